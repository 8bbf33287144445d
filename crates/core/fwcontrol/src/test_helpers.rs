use std::sync::Arc;
use std::sync::Mutex;
use system_services::SystemService;
use system_services::SystemServiceError;
use system_services::SystemServiceManager;

/// How the fake status query responds
#[derive(Debug, Copy, Clone)]
pub(crate) enum Probe {
    Active,
    Inactive,
    Fail,
}

/// How the fake start and stop commands respond
#[derive(Debug, Copy, Clone)]
pub(crate) enum Mutation {
    Succeed,
    ExitWith(i32),
    Killed,
    Unspawnable,
}

/// In-memory service manager recording the commands it is asked to run
#[derive(Debug)]
pub(crate) struct FakeServiceManager {
    probe: Probe,
    mutation: Mutation,
    calls: Mutex<Vec<String>>,
}

impl FakeServiceManager {
    pub(crate) fn new(probe: Probe, mutation: Mutation) -> Arc<Self> {
        Arc::new(FakeServiceManager {
            probe,
            mutation,
            calls: Mutex::new(vec![]),
        })
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, command: &str, service: SystemService<'_>) -> String {
        let call = format!("{command} {service}");
        self.calls.lock().unwrap().push(call.clone());
        call
    }

    fn mutate(&self, command: &str, service: SystemService<'_>) -> Result<(), SystemServiceError> {
        let call = self.record(command, service);
        let service_command = format!("systemctl {call}");
        match self.mutation {
            Mutation::Succeed => Ok(()),
            Mutation::ExitWith(code) => Err(SystemServiceError::ServiceCommandFailedWithCode {
                service_command,
                code,
            }),
            Mutation::Killed => {
                Err(SystemServiceError::ServiceCommandFailedBySignal { service_command })
            }
            Mutation::Unspawnable => Err(SystemServiceError::ServiceCommandNotFound {
                service_command,
                reason: "Permission denied (os error 13)".into(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl SystemServiceManager for FakeServiceManager {
    fn name(&self) -> &str {
        "fake"
    }

    async fn check_operational(&self) -> Result<(), SystemServiceError> {
        Ok(())
    }

    async fn stop_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
        self.mutate("stop", service)
    }

    async fn start_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
        self.mutate("start", service)
    }

    async fn is_service_running(
        &self,
        service: SystemService<'_>,
    ) -> Result<bool, SystemServiceError> {
        self.record("is_active", service);
        match self.probe {
            Probe::Active => Ok(true),
            Probe::Inactive => Ok(false),
            Probe::Fail => Err(SystemServiceError::ServiceCommandNotFound {
                service_command: format!("systemctl is-active --quiet {service}"),
                reason: "No such file or directory (os error 2)".into(),
            }),
        }
    }
}
