// Service exports
pub mod resend;

pub use resend::{Attachment, OutboundEmail, ResendClient, ResendError, SendReceipt};
