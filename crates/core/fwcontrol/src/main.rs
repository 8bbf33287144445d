use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = fwcontrol::FwControlOpt::parse();
    fwcontrol::run(opt).await
}
