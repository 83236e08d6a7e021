
use crate::ast::AttributePath;
use crate::parser::parse;

pub(super) fn path(raw: &str) -> AttributePath {
    parse(raw).unwrap()
}
