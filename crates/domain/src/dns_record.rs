mod record_type;
mod record_type_set;

pub use record_type::RecordType;
pub use record_type_set::RecordTypeSet;
