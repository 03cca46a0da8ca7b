mod compose;
mod render;
mod sender;


pub use render::{RenderError, RenderedAlert, render_due, render_web_changed};
pub use sender::{MailError, MailSender};
