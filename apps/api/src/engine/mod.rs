// Rule engine over a computed chart: ten gods, twelve stages, spirit stars,
// relations, element balance and luck cycles. Pure functions, no I/O.

pub mod elements;
pub mod luck;
pub mod relations;
pub mod sinsal;
pub mod sipsin;
pub mod twelve_sinsal;
pub mod unseong;
