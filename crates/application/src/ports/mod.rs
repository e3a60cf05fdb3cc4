mod dns_message_forwarder;
mod dns_query_driver;

pub use dns_message_forwarder::DnsMessageForwarder;
pub use dns_query_driver::DnsQueryDriver;
