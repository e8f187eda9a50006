mod function_identity;
mod log_line;

pub use function_identity::{function_name_from_arn, FunctionIdentity};
pub use log_line::LogLine;
