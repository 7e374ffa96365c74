use chrono::{DateTime, Utc};
use serde::Serialize;

/// Product introduction document as accepted by the registry's
/// documents/create endpoint. Every scalar field is optional; absent
/// fields stay out of the serialized payload entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub description: Option<Description>,
    pub doc_id: Option<String>,
    pub doc_status: Option<String>,
    pub doc_type: Option<String>,
    pub import_request: Option<String>,
    pub owner_inn: Option<String>,
    pub participant_inn: Option<String>,
    pub producer_inn: Option<String>,
    pub production_date: Option<String>,
    pub production_type: Option<String>,
    pub products: Vec<Product>,
    pub reg_date: Option<String>,
    pub reg_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    pub participant_inn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub certificate_document: Option<String>,
    pub certificate_document_date: Option<String>,
    pub certificate_document_number: Option<String>,
    pub owner_inn: Option<String>,
    pub producer_inn: Option<String>,
    pub production_date: Option<String>,
    pub tnved_code: Option<String>,
    pub uit_code: Option<String>,
    pub uitu_code: Option<String>,
}

/// Wire-format serialization over the fixed document schema. The registry
/// rejects explicit nulls, so absence is expressed by omitting the field.
pub trait ToJson {
    fn to_json(&self) -> String;
}

impl ToJson for Document {
    fn to_json(&self) -> String {
        JsonBuilder::new()
            .object_field("description", self.description.as_ref())
            .string_field("doc_id", self.doc_id.as_deref())
            .string_field("doc_status", self.doc_status.as_deref())
            .string_field("doc_type", self.doc_type.as_deref())
            // camelCase on the wire, unlike the rest of the schema
            .string_field("importRequest", self.import_request.as_deref())
            .string_field("owner_inn", self.owner_inn.as_deref())
            .string_field("participant_inn", self.participant_inn.as_deref())
            .string_field("producer_inn", self.producer_inn.as_deref())
            .string_field("production_date", self.production_date.as_deref())
            .string_field("production_type", self.production_type.as_deref())
            .array_field("products", &self.products)
            .string_field("reg_date", self.reg_date.as_deref())
            .string_field("reg_number", self.reg_number.as_deref())
            .finish()
    }
}

impl ToJson for Description {
    fn to_json(&self) -> String {
        JsonBuilder::new()
            .string_field("participantInn", self.participant_inn.as_deref())
            .finish()
    }
}

impl ToJson for Product {
    fn to_json(&self) -> String {
        JsonBuilder::new()
            .string_field("certificate_document", self.certificate_document.as_deref())
            .string_field(
                "certificate_document_date",
                self.certificate_document_date.as_deref(),
            )
            .string_field(
                "certificate_document_number",
                self.certificate_document_number.as_deref(),
            )
            .string_field("owner_inn", self.owner_inn.as_deref())
            .string_field("producer_inn", self.producer_inn.as_deref())
            .string_field("production_date", self.production_date.as_deref())
            .string_field("tnved_code", self.tnved_code.as_deref())
            .string_field("uit_code", self.uit_code.as_deref())
            .string_field("uitu_code", self.uitu_code.as_deref())
            .finish()
    }
}

/// Appends fields in schema order, skipping absent values and empty lists.
struct JsonBuilder {
    buf: String,
    has_fields: bool,
}

impl JsonBuilder {
    fn new() -> Self {
        Self {
            buf: String::from("{"),
            has_fields: false,
        }
    }

    fn string_field(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.separate();
            self.buf.push('"');
            self.buf.push_str(name);
            self.buf.push_str("\":\"");
            self.buf.push_str(&escape(value));
            self.buf.push('"');
        }
        self
    }

    fn object_field<T: ToJson>(mut self, name: &str, value: Option<&T>) -> Self {
        if let Some(value) = value {
            self.separate();
            self.buf.push('"');
            self.buf.push_str(name);
            self.buf.push_str("\":");
            self.buf.push_str(&value.to_json());
        }
        self
    }

    fn array_field<T: ToJson>(mut self, name: &str, values: &[T]) -> Self {
        if values.is_empty() {
            return self;
        }
        self.separate();
        self.buf.push('"');
        self.buf.push_str(name);
        self.buf.push_str("\":[");
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.buf.push_str(&value.to_json());
        }
        self.buf.push(']');
        self
    }

    fn finish(mut self) -> String {
        self.buf.push('}');
        self.buf
    }

    fn separate(&mut self) {
        if self.has_fields {
            self.buf.push(',');
        } else {
            self.has_fields = true;
        }
    }
}

// Only embedded quotes need escaping in this schema's values.
fn escape(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub submission_id: String,
    pub attempts: usize,
    pub timestamp: DateTime<Utc>,
}

/// Journal entry kept per logical submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    pub submission_id: String,
    pub doc_id: Option<String>,
    pub status: String,
    pub attempts: usize,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}
