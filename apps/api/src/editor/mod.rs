// Editor: the form surface of the resume builder.
// Every form event maps to one `EditCommand`; `apply` is the only writer of a
// session's `ResumeRecord`.

pub mod commands;
pub mod handlers;
pub mod schema;
