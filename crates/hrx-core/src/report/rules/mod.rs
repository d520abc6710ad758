//! Rule-based field extraction primitives for pt-BR HR reports.

pub mod catalog;
pub mod numbers;
pub mod patterns;

pub use catalog::{rules, FieldKind, FieldRule, TargetType};
pub use numbers::{format_brl, parse_br_count, parse_br_decimal, parse_br_float};
