// Domain layer: the stock record model and the ports the screener talks through.

pub mod model;
pub mod ports;
