//! Shared fixtures and a realistic model for the integration tests.
#![allow(dead_code)]

use jsontree_core::{Decode, Decoder, Encode, Encoder, Result};

pub const USER: &str = include_str!("../fixtures/user.json");
pub const USER_RESPONSE: &str = include_str!("../fixtures/user_response.json");
pub const USER_MALFORMED: &str = include_str!("../fixtures/user_malformed.json");

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GadgetKind {
    Phone,
    Laptop,
}

impl Decode for GadgetKind {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let raw: String = decoder.single().decode()?;
        match raw.as_str() {
            "phone" => Ok(GadgetKind::Phone),
            "laptop" => Ok(GadgetKind::Laptop),
            other => Err(decoder.data_corrupted(format!("unknown gadget type {other:?}"))),
        }
    }
}

impl Encode for GadgetKind {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let raw = match self {
            GadgetKind::Phone => "phone",
            GadgetKind::Laptop => "laptop",
        };
        encoder.single().encode(raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gadget {
    pub kind: GadgetKind,
    pub name: String,
}

impl Decode for Gadget {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        Ok(Gadget {
            kind: keyed.decode("type")?,
            name: keyed.decode("name")?,
        })
    }
}

impl Encode for Gadget {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut keyed = encoder.keyed()?;
        keyed.encode("type", &self.kind)?;
        keyed.encode("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub age: i32,
    pub happiness: f32,
    pub height: i32,
    pub has_children: bool,
    pub has_grandchildren: bool,
    pub has_cousins: bool,
    pub has_twin: bool,
    pub gadgets: Vec<Gadget>,
}

impl Decode for User {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        Ok(User {
            first_name: keyed.decode("firstName")?,
            last_name: keyed.decode("lastName")?,
            email: keyed.decode_if_present("email")?,
            age: keyed.decode("age")?,
            happiness: keyed.decode("happiness")?,
            height: keyed.decode("height")?,
            has_children: keyed.decode("hasChildren")?,
            has_grandchildren: keyed.decode("hasGrandchildren")?,
            has_cousins: keyed.decode("hasCousins")?,
            has_twin: keyed.decode("hasTwin")?,
            gadgets: keyed.decode("gadgets")?,
        })
    }
}

impl Encode for User {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut keyed = encoder.keyed()?;
        keyed.encode("firstName", &self.first_name)?;
        keyed.encode("lastName", &self.last_name)?;
        keyed.encode_if_present("email", &self.email)?;
        keyed.encode("age", &self.age)?;
        keyed.encode("happiness", &self.happiness)?;
        keyed.encode("height", &self.height)?;
        keyed.encode("hasChildren", &self.has_children)?;
        keyed.encode("hasGrandchildren", &self.has_grandchildren)?;
        keyed.encode("hasCousins", &self.has_cousins)?;
        keyed.encode("hasTwin", &self.has_twin)?;
        keyed.encode("gadgets", &self.gadgets)
    }
}

/// The user every fixture describes once coercion has been applied.
pub fn john() -> User {
    User {
        first_name: "John".into(),
        last_name: "Smith".into(),
        email: None,
        age: 20,
        happiness: 5.5,
        height: 170,
        has_children: true,
        has_grandchildren: false,
        has_cousins: true,
        has_twin: false,
        gadgets: vec![
            Gadget {
                kind: GadgetKind::Phone,
                name: "iPhone".into(),
            },
            Gadget {
                kind: GadgetKind::Laptop,
                name: "linux".into(),
            },
        ],
    }
}
