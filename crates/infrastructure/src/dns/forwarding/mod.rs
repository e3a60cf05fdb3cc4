pub mod answer_parser;
pub mod message_builder;
pub mod record_type_map;
pub mod response_parser;

pub use answer_parser::AnswerParser;
pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
pub use response_parser::ResponseParser;
