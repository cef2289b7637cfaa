use super::Output;
use crate::error::AuditError;
use crate::license::{License, StatusType};
use crate::module::Module;

/// Fans every event out to several outputs, in order.
///
/// All outputs see every event; the first error is returned.
pub struct MultiOutput {
    outputs: Vec<Box<dyn Output>>,
}

impl MultiOutput {
    pub fn new(outputs: Vec<Box<dyn Output>>) -> Self {
        Self { outputs }
    }

    fn each<F>(&self, mut f: F) -> Result<(), AuditError>
    where
        F: FnMut(&dyn Output) -> Result<(), AuditError>,
    {
        let mut first_err = None;
        for output in &self.outputs {
            if let Err(err) = f(output.as_ref()) {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Output for MultiOutput {
    fn start(&self, module: &Module) -> Result<(), AuditError> {
        self.each(|output| output.start(module))
    }

    fn update(&self, module: &Module, status: StatusType, message: &str) -> Result<(), AuditError> {
        self.each(|output| output.update(module, status, message))
    }

    fn finish(
        &self,
        module: &Module,
        license: Option<License>,
        resolution_err: Option<&anyhow::Error>,
    ) -> Result<(), AuditError> {
        self.each(|output| output.finish(module, license.clone(), resolution_err))
    }

    fn close(&self) -> Result<(), AuditError> {
        self.each(|output| output.close())
    }

    fn exit_code(&self) -> i32 {
        self.outputs.iter().map(|o| o.exit_code()).max().unwrap_or(0)
    }
}
