use std::sync::Arc;

/// Diagnostic console of the dashboard (hexagonal port).
/// Logging never fails from the caller's point of view.
pub trait DashboardLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn DashboardLogger>;
