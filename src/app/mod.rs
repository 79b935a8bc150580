pub mod dispatch;
pub mod session;

pub use session::GradingSession;
