//! Maps free-text contact field names onto fixed [`Contact`] slots.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::record::Contact;

/// A recognized contact attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Organization,
    Street,
    City,
    State,
    Zip,
    Country,
    Phone,
    Fax,
    Email,
}

static CONTACT_FIELDS: Lazy<HashMap<&'static str, ContactField>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("name", ContactField::Name);
    m.insert("organization", ContactField::Organization);
    m.insert("organisation", ContactField::Organization);
    m.insert("street", ContactField::Street);
    m.insert("city", ContactField::City);
    m.insert("state/province", ContactField::State);
    m.insert("state", ContactField::State);
    m.insert("postal code", ContactField::Zip);
    m.insert("zip", ContactField::Zip);
    m.insert("country", ContactField::Country);
    m.insert("phone", ContactField::Phone);
    m.insert("fax", ContactField::Fax);
    m.insert("email", ContactField::Email);

    m
});

impl ContactField {
    /// Looks up a field name such as `"postal code"`. Matching ignores case
    /// and surrounding whitespace; unknown names yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        CONTACT_FIELDS
            .get(label.trim().to_lowercase().as_str())
            .copied()
    }

    pub fn set(self, contact: &mut Contact, value: String) {
        let slot = match self {
            ContactField::Name => &mut contact.name,
            ContactField::Organization => &mut contact.organization,
            ContactField::Street => &mut contact.street,
            ContactField::City => &mut contact.city,
            ContactField::State => &mut contact.state,
            ContactField::Zip => &mut contact.zip,
            ContactField::Country => &mut contact.country,
            ContactField::Phone => &mut contact.phone,
            ContactField::Fax => &mut contact.fax,
            ContactField::Email => &mut contact.email,
        };
        *slot = Some(value);
    }
}
