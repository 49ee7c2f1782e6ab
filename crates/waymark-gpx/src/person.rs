//! The author of a document: a person with an optional email and link

use crate::link::Link;
use crate::types::InvalidValue;
use serde::{Deserialize, Serialize};
use waymark_xml::{
    emit_nested, emit_scalar, read_element, write_element, AttributeField, NestedField, Result,
    ScalarField, TokenSink, TokenSource, XmlElement,
};

/// An email address split into its id and domain halves
///
/// The address is carried on the wire as two attributes (`id` and
/// `domain`), never as element text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email {
    id: String,
    domain: String,
}

impl Email {
    /// Canonical element name.
    pub const TAG: &'static str = "email";

    /// Creates an email from its id and domain halves.
    #[must_use = "creates a value that should be used"]
    pub fn of(id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            domain: domain.into(),
        }
    }

    /// Splits a full address at its last `@`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidValue`] if the address contains no `@`, or if
    /// either half is empty.
    pub fn parse_address(address: &str) -> std::result::Result<Self, InvalidValue> {
        match address.rsplit_once('@') {
            Some((id, domain)) if !id.is_empty() && !domain.is_empty() => {
                Ok(Self::of(id, domain))
            }
            _ => Err(InvalidValue::new(format!(
                "not an email address: {address:?}"
            ))),
        }
    }

    /// Returns the part before the `@`.
    #[must_use = "returns the address id"]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the part after the `@`.
    #[must_use = "returns the address domain"]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the full `id@domain` address.
    #[must_use = "returns the joined address"]
    pub fn address(&self) -> String {
        format!("{}@{}", self.id, self.domain)
    }
}

impl XmlElement for Email {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut id = AttributeField::new("id");
        let mut domain = AttributeField::new("domain");

        read_element(source, tag, &mut [&mut id, &mut domain], &mut [])?;

        Ok(Self {
            id: id.require(tag)?,
            domain: domain.require(tag)?,
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(
            sink,
            tag,
            &[("id", self.id.clone()), ("domain", self.domain.clone())],
            |_| Ok(()),
        )
    }
}

/// A person (or organization) credited as the document author
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    name: Option<String>,
    email: Option<Email>,
    link: Option<Link>,
}

impl Person {
    /// Canonical element name.
    pub const TAG: &'static str = "author";

    /// Creates a person with only a name.
    #[must_use = "creates a value that should be used"]
    pub fn of(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
            link: None,
        }
    }

    /// Returns a builder for all fields.
    #[must_use = "returns a builder that must be completed with build()"]
    pub fn builder() -> PersonBuilder {
        PersonBuilder::default()
    }

    /// Returns the person's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the person's email, if any.
    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Returns a link to information about the person, if any.
    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }
}

impl XmlElement for Person {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut name = ScalarField::new("name");
        let mut email = NestedField::<Email>::new(Email::TAG);
        let mut link = NestedField::<Link>::new(Link::TAG);

        read_element(
            source,
            tag,
            &mut [],
            &mut [&mut name, &mut email, &mut link],
        )?;

        Ok(Self {
            name: name.take(),
            email: email.take(),
            link: link.take(),
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(sink, tag, &[], |sink| {
            emit_scalar(sink, "name", self.name.as_deref())?;
            emit_nested(sink, Email::TAG, self.email.as_ref())?;
            emit_nested(sink, Link::TAG, self.link.as_ref())
        })
    }
}

/// Staging area for [`Person`] construction
#[derive(Debug, Clone, Default)]
pub struct PersonBuilder {
    name: Option<String>,
    email: Option<Email>,
    link: Option<Link>,
}

impl PersonBuilder {
    /// Sets the person's name.
    #[must_use = "builder setters return the builder"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the person's email.
    #[must_use = "builder setters return the builder"]
    pub fn email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    /// Sets a link to information about the person.
    #[must_use = "builder setters return the builder"]
    pub fn link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }

    /// Builds the immutable person.
    #[must_use = "builds the immutable person"]
    pub fn build(self) -> Person {
        Person {
            name: self.name,
            email: self.email,
            link: self.link,
        }
    }
}
