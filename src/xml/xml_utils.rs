use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::core::FacturaError;

pub type XmlResult = Result<String, FacturaError>;

fn xml_io(e: std::io::Error) -> FacturaError {
    FacturaError::Xml(format!("XML write error: {e}"))
}

pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, FacturaError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(quick_xml::events::BytesDecl::new(
                "1.0",
                Some("UTF-8"),
                None,
            )))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> Result<String, FacturaError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| FacturaError::Xml(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, FacturaError> {
        let elem = BytesStart::new(name);
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, FacturaError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, FacturaError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, FacturaError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Write a fixed-point amount with exactly `dp` decimal places.
    pub fn amount_element(
        &mut self,
        name: &str,
        amount: Decimal,
        dp: u32,
    ) -> Result<&mut Self, FacturaError> {
        self.text_element(name, &format_fixed(amount, dp))
    }
}

/// Render a Decimal as a fixed-point string with exactly `dp` decimal
/// places, rounding half-up. Hacienda rejects amounts whose width varies,
/// so trailing zeros are always kept (e.g. `1234.5` at 5 → "1234.50000").
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded =
        value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn format_fixed_pads_and_rounds() {
        assert_eq!(format_fixed(dec!(1234.5), 5), "1234.50000");
        assert_eq!(format_fixed(dec!(100), 2), "100.00");
        assert_eq!(format_fixed(dec!(13), 2), "13.00");
        assert_eq!(format_fixed(dec!(0), 5), "0.00000");
    }

    #[test]
    fn format_fixed_is_half_up() {
        assert_eq!(format_fixed(dec!(1.005), 2), "1.01");
        assert_eq!(format_fixed(dec!(1.004), 2), "1.00");
        assert_eq!(format_fixed(dec!(2.675), 2), "2.68");
        assert_eq!(format_fixed(dec!(0.000005), 5), "0.00001");
    }
}
