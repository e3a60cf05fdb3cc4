use dnsprobe_domain::{RecordType, RecordTypeSet};
use dnsprobe_infrastructure::dns::forwarding::{MessageBuilder, RecordTypeMapper, ResponseParser};
use hickory_proto::op::{Message, MessageType, ResponseCode};

#[test]
fn test_query_decodes_to_same_question() {
    for record_type in [RecordType::A, RecordType::AAAA, RecordType::MX, RecordType::SOA] {
        let (id, bytes) = MessageBuilder::build_query_with_id("example.com", &record_type).unwrap();
        let message = Message::from_vec(&bytes).unwrap();

        assert_eq!(message.id(), id);
        assert_eq!(message.message_type(), MessageType::Query);
        assert!(message.recursion_desired());

        let question = &message.queries()[0];
        assert_eq!(question.name().to_utf8(), "example.com.");
        assert_eq!(
            RecordTypeMapper::from_hickory(question.query_type()),
            Some(record_type)
        );
    }
}

#[test]
fn test_invalid_domain_is_rejected() {
    let label = "a".repeat(64);
    let result = MessageBuilder::build_query(&format!("{}.com", label), &RecordType::A);
    assert!(result.is_err());
}

#[test]
fn test_response_echoes_request() {
    let bytes = MessageBuilder::build_query("example.com", &RecordType::TXT).unwrap();
    let request = Message::from_vec(&bytes).unwrap();

    let response = MessageBuilder::build_response(&request, ResponseCode::NXDomain, vec![]);
    let encoded = MessageBuilder::serialize(&response).unwrap();
    let decoded = ResponseParser::parse(&encoded).unwrap();

    assert_eq!(decoded.id(), request.id());
    assert_eq!(decoded.response_code(), ResponseCode::NXDomain);
    assert_eq!(decoded.queries(), request.queries());
    assert!(decoded.recursion_available());

    let txt = RecordTypeSet::resolve("TXT");
    assert!(ResponseParser::format_answers(&decoded, RecordType::TXT, &txt).is_empty());
}
