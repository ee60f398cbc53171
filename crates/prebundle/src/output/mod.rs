mod formatter;
mod plain;

pub(crate) use formatter::CheckFormatter;
pub(crate) use plain::PlainTextFormatter;
