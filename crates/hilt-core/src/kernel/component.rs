use std::any::Any;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::kernel::error::Result;

/// Core lifecycle trait for session components.
///
/// Components are constructed by the session's composition root, initialized
/// once at session start and stopped at session end.
#[async_trait]
pub trait SessionComponent: Any + Send + Sync + Debug {
    fn name(&self) -> &'static str;
    async fn initialize(&self) -> Result<()>;
    async fn start(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
}
