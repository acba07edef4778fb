// Code generated by ipld-schema-tool. DO NOT EDIT.
//! Start-up binding table for the `store` schema.
use ipld_schema_tool::bind::{Bindings, Lazy, Prototype};

/// `store.ipldsch`, embedded verbatim.
pub const SCHEMA_SOURCE: &str = r#"# One type per representation strategy, plus a record that uses them all.
type Name string
type Count int
type Ratio float
type Flag bool
type Blob bytes
type Parent &Entry
type Tags [String]

type Shade enum {
    | Light ("l")
    | Dark ("d")
}

type Level enum {
    | Low ("1")
    | High ("2")
} representation int

type Scores {String:nullable Int}
type Weights {Shade:Int} representation stringpairs("=", "&")
type Labels {String:Int} representation listpairs

type Point struct {
    x Int
    y Int
} representation tuple

type Range struct {
    start Int
    end Int
} representation stringjoin(":")

type Query struct {
    page Int
    shade Shade
} representation stringpairs("=", "&")

type Pairs struct {
    left Int
    right optional String
} representation listpairs

type Opened struct {
    at Int
}

type Closed struct {
    at Int
    reason optional String
}

type Status union {
    | "rw:" Name
    | "ro:" Range
} representation stringprefix

type Shape union {
    | Point "point"
    | Range "range"
} representation keyed

type Value union {
    | Name string
    | Count int
    | Tags list
} representation kinded

type Event union {
    | "open" Opened
    | "close" Closed
} representation inline("kind")

type Envelope union {
    | "point" Point
    | "scores" Scores
} representation envelope("tag", "body")

type Entry struct {
    name Name
    count optional Count
    note optional nullable String
    ratio nullable Ratio
    flag Flag
    blob Blob
    parent optional Parent
    target nullable &Entry
    tags Tags
    scores Scores
    weights Weights
    labels Labels
    point Point
    query Query
    pairs Pairs
    status Status
    shape Shape
    value Value
    event Event
    envelope Envelope
    level Level
    children [Entry]
    meta {String:Int}
}
"#;

/// One prototype per placeholder in `types.rs`.
pub struct Types {
    pub bindings: Bindings,
    pub name: Prototype,
    pub count: Prototype,
    pub ratio: Prototype,
    pub flag: Prototype,
    pub blob: Prototype,
    pub parent: Prototype,
    pub tags: Prototype,
    pub shade: Prototype,
    pub level: Prototype,
    pub scores: Prototype,
    pub weights: Prototype,
    pub labels: Prototype,
    pub point: Prototype,
    pub range: Prototype,
    pub query: Prototype,
    pub pairs: Prototype,
    pub opened: Prototype,
    pub closed: Prototype,
    pub status: Prototype,
    pub shape: Prototype,
    pub value: Prototype,
    pub event: Prototype,
    pub envelope: Prototype,
    pub entry: Prototype,
}

pub static TYPES: Lazy<Types> = Lazy::new(|| {
    let bindings = Bindings::load(SCHEMA_SOURCE)
        .unwrap_or_else(|err| panic!("embedded schema failed to load: {err}"));
    let prototype = |name: &str| {
        bindings.prototype(name).unwrap_or_else(|err| panic!("binding {name}: {err}"))
    };
    Types {
        name: prototype("Name"),
        count: prototype("Count"),
        ratio: prototype("Ratio"),
        flag: prototype("Flag"),
        blob: prototype("Blob"),
        parent: prototype("Parent"),
        tags: prototype("Tags"),
        shade: prototype("Shade"),
        level: prototype("Level"),
        scores: prototype("Scores"),
        weights: prototype("Weights"),
        labels: prototype("Labels"),
        point: prototype("Point"),
        range: prototype("Range"),
        query: prototype("Query"),
        pairs: prototype("Pairs"),
        opened: prototype("Opened"),
        closed: prototype("Closed"),
        status: prototype("Status"),
        shape: prototype("Shape"),
        value: prototype("Value"),
        event: prototype("Event"),
        envelope: prototype("Envelope"),
        entry: prototype("Entry"),
        bindings,
    }
});

/// Load and bind the embedded schema now instead of on first use.
/// Panics if it does not load.
pub fn init() {
    Lazy::force(&TYPES);
}
