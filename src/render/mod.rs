mod escape;
mod xml;

use crate::model::NumberingDocument;
use crate::Result;

pub use escape::escape_xml_attr;
pub use xml::{generate_num_pr, generate_numbering_xml, NumberingXmlRenderer, W_NAMESPACE};

pub trait Renderer {
    fn render(&self, document: &NumberingDocument) -> Result<String>;
}
