//! Generic XML-document-to-record decoder.
//!
//! [`decode`] flattens an arbitrarily nested, namespaced, attributed XML tree into a
//! uniform name/value/attributes/children structure that feed parsers can query
//! without touching XML again. Names are normalized (`wt:crawlType` →
//! `wt:crawl_type`), exact `true`/`false` text becomes a boolean, and sibling
//! elements sharing a name are promoted to an ordered sequence.

// crates.io
use quick_xml::{
	Reader,
	events::{BytesStart, Event},
};
// self
use crate::{_prelude::*, error::DecodeError};

/// One decoded XML element.
///
/// `attributes` and `children` are always present and possibly empty; use the
/// `Option`-returning accessors instead of probing the maps for key existence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct XmlNode {
	/// Normalized element name, namespace prefix included.
	pub name: String,
	/// Direct text content of the element.
	pub value: XmlValue,
	/// Normalized attribute name → raw attribute value.
	pub attributes: BTreeMap<String, String>,
	/// Normalized child name → one child or an ordered sequence of same-named siblings.
	pub children: BTreeMap<String, NodeSlot>,
}
impl XmlNode {
	fn new(name: String) -> Self {
		Self {
			name,
			value: XmlValue::Text(String::new()),
			attributes: BTreeMap::new(),
			children: BTreeMap::new(),
		}
	}

	/// Returns the first child decoded under the given normalized name.
	pub fn child(&self, name: &str) -> Option<&XmlNode> {
		self.children.get(name).map(NodeSlot::first)
	}

	/// Iterates every child decoded under the given normalized name, in document order.
	pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlNode> {
		self.children.get(name).into_iter().flat_map(NodeSlot::iter)
	}

	/// Returns the raw value of the given normalized attribute name.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).map(String::as_str)
	}

	/// Returns the text value, unless it was coerced to a boolean.
	pub fn text(&self) -> Option<&str> {
		self.value.as_str()
	}
}

/// Element value: the direct text content, or a boolean when that text is exactly
/// the literal `true` or `false`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XmlValue {
	/// Boolean coerced from an exact `true`/`false` literal.
	Bool(bool),
	/// Any other text content, preserved byte for byte.
	Text(String),
}
impl XmlValue {
	fn from_text(text: String) -> Self {
		match text.as_str() {
			"true" => Self::Bool(true),
			"false" => Self::Bool(false),
			_ => Self::Text(text),
		}
	}

	/// Returns the text content, or `None` for a coerced boolean.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::Bool(_) => None,
		}
	}

	/// Returns the boolean, or `None` for plain text.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			Self::Text(_) => None,
		}
	}
}

/// Slot for a child name: a lone node, or an ordered sequence once a second
/// same-named sibling is encountered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSlot {
	/// Exactly one child was decoded under this name.
	One(XmlNode),
	/// Two or more same-named siblings, in document order.
	Many(Vec<XmlNode>),
}
impl NodeSlot {
	/// Returns the first node in the slot.
	pub fn first(&self) -> &XmlNode {
		match self {
			Self::One(node) => node,
			Self::Many(nodes) => &nodes[0],
		}
	}

	/// Iterates the slot's nodes in document order.
	pub fn iter(&self) -> impl Iterator<Item = &XmlNode> {
		match self {
			Self::One(node) => std::slice::from_ref(node).iter(),
			Self::Many(nodes) => nodes.iter(),
		}
	}

	/// Number of nodes in the slot.
	pub fn len(&self) -> usize {
		match self {
			Self::One(_) => 1,
			Self::Many(nodes) => nodes.len(),
		}
	}

	/// Always `false`; slots only exist for at least one decoded child.
	pub fn is_empty(&self) -> bool {
		false
	}

	fn push(&mut self, node: XmlNode) {
		match self {
			Self::One(_) => {
				let Self::One(existing) = std::mem::replace(self, Self::Many(Vec::with_capacity(2)))
				else {
					unreachable!()
				};
				let Self::Many(nodes) = self else { unreachable!() };

				nodes.push(existing);
				nodes.push(node);
			},
			Self::Many(nodes) => nodes.push(node),
		}
	}
}

/// Decodes an XML document into its top-level elements, keyed by normalized name.
pub fn decode(xml: &str) -> Result<BTreeMap<String, XmlNode>, DecodeError> {
	let mut reader = Reader::from_str(xml);
	let mut roots = BTreeMap::new();
	let mut stack: Vec<XmlNode> = Vec::new();

	loop {
		match reader.read_event()? {
			Event::Start(start) => stack.push(open_node(&start)?),
			Event::Empty(start) => {
				let mut node = open_node(&start)?;

				node.value = XmlValue::from_text(String::new());
				attach(&mut roots, &mut stack, node);
			},
			Event::End(_) => {
				let mut node = stack.pop().expect("Reader validates end tags before emitting End.");

				node.value = XmlValue::from_text(match node.value {
					XmlValue::Text(text) => text,
					XmlValue::Bool(_) => unreachable!("Coercion only happens on close."),
				});
				attach(&mut roots, &mut stack, node);
			},
			Event::Text(text) => {
				if let Some(open) = stack.last_mut()
					&& let XmlValue::Text(buf) = &mut open.value
				{
					buf.push_str(&text.unescape()?);
				}
			},
			Event::CData(data) => {
				if let Some(open) = stack.last_mut()
					&& let XmlValue::Text(buf) = &mut open.value
				{
					buf.push_str(&String::from_utf8_lossy(data.as_ref()));
				}
			},
			Event::Eof =>
				if let Some(open) = stack.pop() {
					return Err(DecodeError::UnclosedElement { name: open.name });
				} else {
					break;
				},
			// Declarations, processing instructions, comments, and doctypes carry no data.
			_ => {},
		}
	}

	Ok(roots)
}

fn open_node(start: &BytesStart) -> Result<XmlNode, DecodeError> {
	let raw_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
	let mut node = XmlNode::new(normalize_name(&raw_name));

	for attribute in start.attributes() {
		let attribute = attribute?;
		let raw_key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();

		// Namespace declarations are not data attributes.
		if raw_key == "xmlns" || raw_key.starts_with("xmlns:") {
			continue;
		}

		let value = attribute.unescape_value()?.into_owned();

		// Attribute values stay raw strings; only element text is bool-coerced.
		node.attributes.insert(normalize_name(&raw_key), value);
	}

	Ok(node)
}

fn attach(roots: &mut BTreeMap<String, XmlNode>, stack: &mut [XmlNode], node: XmlNode) {
	match stack.last_mut() {
		Some(parent) => match parent.children.get_mut(&node.name) {
			Some(slot) => slot.push(node),
			None => {
				parent.children.insert(node.name.clone(), NodeSlot::One(node));
			},
		},
		None => {
			roots.insert(node.name.clone(), node);
		},
	}
}

/// Normalizes a (possibly namespaced) XML name: hyphens become underscores, an
/// underscore is inserted between a lowercase letter and a following uppercase
/// letter, and the result is lowercased.
pub fn normalize_name(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len() + 4);
	let mut prev_lowercase = false;

	for ch in raw.chars() {
		if ch == '-' {
			out.push('_');
			prev_lowercase = false;

			continue;
		}
		if ch.is_ascii_uppercase() && prev_lowercase {
			out.push('_');
		}

		prev_lowercase = ch.is_ascii_lowercase();

		out.push(ch.to_ascii_lowercase());
	}

	out
}
