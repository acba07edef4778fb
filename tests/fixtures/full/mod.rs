// Code generated by ipld-schema-tool. DO NOT EDIT.
//! Bindings for the `store` schema.

mod name;
pub use name::Name;
mod count;
pub use count::Count;
mod ratio;
pub use ratio::Ratio;
mod flag;
pub use flag::Flag;
mod blob;
pub use blob::Blob;
mod parent;
pub use parent::Parent;
mod tags;
pub use tags::Tags;
mod shade;
pub use shade::Shade;
mod level;
pub use level::Level;
mod scores;
pub use scores::Scores;
mod weights;
pub use weights::Weights;
mod labels;
pub use labels::Labels;
mod point;
pub use point::Point;
mod range;
pub use range::Range;
mod query;
pub use query::Query;
mod pairs;
pub use pairs::Pairs;
mod opened;
pub use opened::Opened;
mod closed;
pub use closed::Closed;
mod status;
pub use status::Status;
mod shape;
pub use shape::Shape;
mod value;
pub use value::Value;
mod event;
pub use event::Event;
mod envelope;
pub use envelope::Envelope;
mod entry;
pub use entry::Entry;
