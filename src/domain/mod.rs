// Domain layer: transient models of one submission cycle and the ports the dashboard talks to.

pub mod model;
pub mod ports;
