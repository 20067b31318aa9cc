pub mod clock;
pub mod fakes;
pub mod fixtures;
pub mod http;
pub mod logging;
pub mod udp;
