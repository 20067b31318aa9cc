mod http;
mod udp;
