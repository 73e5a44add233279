//! Support for the Qt Linguist `.ts` XML catalog format.
//!
//! Reads `<TS language>`, every `<message>` of every `<context>`, plural
//! `<numerusform>` variants, `<lengthvariant>` alternatives (the first one is
//! kept) and `<byte value>` escapes. Location, context name and translator
//! comment elements are skipped.

use std::io::BufRead;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use serde::Serialize;
use tracing::debug;

use crate::{
    error::Error,
    formats::{CatalogDocument, MessageRecord},
    traits::Parser,
};

#[derive(Debug, Serialize)]
pub struct Format {
    /// The `language` attribute of the `<TS>` root, if present.
    pub language: Option<String>,
    pub messages: Vec<Message>,
}

/// The `type` attribute of a `<translation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationType {
    #[default]
    Finished,
    Unfinished,
    Vanished,
    Obsolete,
}

impl TranslationType {
    fn from_attr(value: &str) -> Self {
        match value {
            "unfinished" => TranslationType::Unfinished,
            "vanished" => TranslationType::Vanished,
            "obsolete" => TranslationType::Obsolete,
            _ => TranslationType::Finished,
        }
    }

    /// Vanished and obsolete messages are kept in `.ts` files for reference
    /// only and are never shipped.
    pub fn is_retired(self) -> bool {
        matches!(self, TranslationType::Vanished | TranslationType::Obsolete)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Message {
    pub id: Option<String>,
    pub numerus: bool,
    pub source: Option<String>,
    pub comment: Option<String>,
    pub extra_comment: Option<String>,
    pub translation_type: TranslationType,
    /// Plural variants, or a single element for plain translations.
    pub translations: Vec<String>,
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut language = None;
        let mut messages = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"TS" => {
                    language = root_language(e)?;
                }
                Ok(Event::Empty(ref e)) if e.name().as_ref() == b"TS" => {
                    language = root_language(e)?;
                }
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"message" => {
                    let message = parse_message(e, &mut xml_reader)?;
                    messages.push(message);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        Ok(Format { language, messages })
    }
}

impl From<Format> for CatalogDocument {
    fn from(value: Format) -> Self {
        let records = value
            .messages
            .into_iter()
            .filter_map(|message| {
                if message.translation_type.is_retired() {
                    debug!(
                        id = message.id.as_deref().unwrap_or_default(),
                        "skipping retired message"
                    );
                    return None;
                }
                Some(message.into_record())
            })
            .collect();
        CatalogDocument {
            language: value.language,
            records,
        }
    }
}

impl Message {
    fn into_record(self) -> MessageRecord {
        let source = self.source.unwrap_or_default();
        MessageRecord {
            // id-less messages are looked up by their source text
            id: self.id.unwrap_or_else(|| source.clone()),
            source,
            comment: self.comment,
            extra_comment: self.extra_comment,
            translations: self.translations,
            numerus: self.numerus,
            unfinished: self.translation_type == TranslationType::Unfinished,
        }
    }
}

fn root_language(e: &BytesStart) -> Result<Option<String>, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::Parse(e.to_string()))?;
        if attr.key.as_ref() == b"language" {
            let value = attr.unescape_value()?.trim().to_string();
            return Ok((!value.is_empty()).then_some(value));
        }
    }
    Ok(None)
}

fn parse_message<R: BufRead>(e: &BytesStart, xml_reader: &mut Reader<R>) -> Result<Message, Error> {
    let mut message = Message::default();

    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::Parse(e.to_string()))?;
        match attr.key.as_ref() {
            b"id" => {
                let id = attr.unescape_value()?.to_string();
                if !id.is_empty() {
                    message.id = Some(id);
                }
            }
            b"numerus" => message.numerus = attr.unescape_value()? == "yes",
            _ => {}
        }
    }

    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"source" => message.source = Some(read_content(xml_reader, b"source")?.preferred()),
                b"comment" => message.comment = non_empty(read_content(xml_reader, b"comment")?.preferred()),
                b"extracomment" => {
                    message.extra_comment =
                        non_empty(read_content(xml_reader, b"extracomment")?.preferred())
                }
                b"translation" => {
                    message.translation_type = translation_type(e)?;
                    let content = read_content(xml_reader, b"translation")?;
                    message.translations = if content.numerus_forms.is_empty() {
                        vec![content.preferred()]
                    } else {
                        content.numerus_forms
                    };
                }
                _ => {
                    let end = e.to_end().into_owned();
                    let mut skip = Vec::new();
                    xml_reader.read_to_end_into(end.name(), &mut skip)?;
                }
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"source" => message.source = Some(String::new()),
                b"translation" => {
                    message.translation_type = translation_type(e)?;
                    message.translations = vec![String::new()];
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"message" => break,
            Ok(Event::Eof) => {
                return Err(Error::parse_error("unexpected end of file inside <message>"));
            }
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }

    if message.source.is_none() {
        return Err(Error::parse_error(format!(
            "message `{}` has no <source>",
            message.id.as_deref().unwrap_or("<without id>")
        )));
    }
    Ok(message)
}

fn translation_type(e: &BytesStart) -> Result<TranslationType, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::Parse(e.to_string()))?;
        if attr.key.as_ref() == b"type" {
            return Ok(TranslationType::from_attr(&attr.unescape_value()?));
        }
    }
    Ok(TranslationType::Finished)
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Text gathered from one element.
#[derive(Debug, Default)]
struct Content {
    text: String,
    numerus_forms: Vec<String>,
    length_variants: Vec<String>,
}

impl Content {
    /// The first length variant if there are any, else the direct text.
    fn preferred(self) -> String {
        self.length_variants
            .into_iter()
            .next()
            .unwrap_or(self.text)
    }
}

/// Reads everything up to the `</end>` matching an already consumed start tag.
fn read_content<R: BufRead>(xml_reader: &mut Reader<R>, end: &[u8]) -> Result<Content, Error> {
    let mut content = Content::default();
    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => content.text.push_str(&e.unescape().map_err(Error::XmlParse)?),
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|err| Error::parse_error(format!("invalid UTF-8 in CDATA: {err}")))?;
                content.text.push_str(text);
            }
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"numerusform" => {
                    let form = read_content(xml_reader, b"numerusform")?;
                    content.numerus_forms.push(form.preferred());
                }
                b"lengthvariant" => {
                    let variant = read_content(xml_reader, b"lengthvariant")?;
                    content.length_variants.push(variant.preferred());
                }
                _ => {
                    let end = e.to_end().into_owned();
                    let mut skip = Vec::new();
                    xml_reader.read_to_end_into(end.name(), &mut skip)?;
                }
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"byte" => content.text.push(byte_value(e)?),
                b"numerusform" => content.numerus_forms.push(String::new()),
                b"lengthvariant" => content.length_variants.push(String::new()),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == end => break,
            Ok(Event::Eof) => {
                return Err(Error::parse_error(format!(
                    "unexpected end of file inside <{}>",
                    String::from_utf8_lossy(end)
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(content)
}

/// Decodes `<byte value="x1B"/>` (hex) or `<byte value="27"/>` (decimal).
fn byte_value(e: &BytesStart) -> Result<char, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::Parse(e.to_string()))?;
        if attr.key.as_ref() != b"value" {
            continue;
        }
        let value = attr.unescape_value()?;
        let code = match value.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => value.parse::<u32>(),
        }
        .map_err(|_| Error::parse_error(format!("invalid <byte> value `{value}`")))?;
        return char::from_u32(code)
            .ok_or_else(|| Error::parse_error(format!("invalid <byte> value `{value}`")));
    }
    Err(Error::parse_error("<byte> without value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_singular_and_plural() {
        let xml = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <!DOCTYPE TS>
            <TS version="2.1" language="pl">
            <context>
                <name></name>
                <message id="app-name">
                    <source>Foil Auth</source>
                    <extracomment>Application title</extracomment>
                    <translation>Foil Auth</translation>
                </message>
                <message id="min-length" numerus="yes">
                    <source>Type at least %0 character(s)</source>
                    <translation>
                        <numerusform>Wprowadź przynajmniej %0 znak</numerusform>
                        <numerusform>Wprowadź przynajmniej %0 znaki</numerusform>
                        <numerusform>Wprowadź przynajmniej %0 znaków</numerusform>
                    </translation>
                </message>
            </context>
            </TS>
        "#};
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.language.as_deref(), Some("pl"));
        assert_eq!(format.messages.len(), 2);

        let name = &format.messages[0];
        assert_eq!(name.id.as_deref(), Some("app-name"));
        assert_eq!(name.source.as_deref(), Some("Foil Auth"));
        assert_eq!(name.extra_comment.as_deref(), Some("Application title"));
        assert_eq!(name.translations, vec!["Foil Auth"]);
        assert!(!name.numerus);

        let plural = &format.messages[1];
        assert!(plural.numerus);
        assert_eq!(
            plural.translations,
            vec![
                "Wprowadź przynajmniej %0 znak",
                "Wprowadź przynajmniej %0 znaki",
                "Wprowadź przynajmniej %0 znaków"
            ]
        );
    }

    #[test]
    fn test_translation_types() {
        let xml = indoc! {r#"
            <TS language="sv">
            <context>
                <message id="a"><source>A</source><translation type="unfinished"></translation></message>
                <message id="b"><source>B</source><translation type="unfinished"/></message>
                <message id="c"><source>C</source><translation type="vanished">Gone</translation></message>
                <message id="d"><source>D</source><translation type="obsolete">Old</translation></message>
            </context>
            </TS>
        "#};
        let format = Format::from_str(xml).unwrap();
        let types: Vec<_> = format.messages.iter().map(|m| m.translation_type).collect();
        assert_eq!(
            types,
            vec![
                TranslationType::Unfinished,
                TranslationType::Unfinished,
                TranslationType::Vanished,
                TranslationType::Obsolete
            ]
        );
        assert_eq!(format.messages[1].translations, vec![""]);

        let document = CatalogDocument::from(format);
        let ids: Vec<_> = document.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(document.records.iter().all(|r| r.unfinished));
    }

    #[test]
    fn test_entities_and_bytes() {
        let xml = indoc! {r#"
            <TS language="en">
            <context>
                <message id="amp">
                    <source>Save &amp; quit &lt;now&gt;</source>
                    <translation>Tab<byte value="x9"/>here &#8230;</translation>
                </message>
            </context>
            </TS>
        "#};
        let format = Format::from_str(xml).unwrap();
        let message = &format.messages[0];
        assert_eq!(message.source.as_deref(), Some("Save & quit <now>"));
        assert_eq!(message.translations, vec!["Tab\there \u{2026}"]);
    }

    #[test]
    fn test_length_variants_prefer_first() {
        let xml = indoc! {r#"
            <TS language="de">
            <context>
                <message id="button">
                    <source>Generate</source>
                    <translation variants="yes">
                        <lengthvariant>Generieren</lengthvariant>
                        <lengthvariant>Gen.</lengthvariant>
                    </translation>
                </message>
            </context>
            </TS>
        "#};
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.messages[0].translations, vec!["Generieren"]);
    }

    #[test]
    fn test_message_without_id_uses_source() {
        let xml = indoc! {r#"
            <TS language="ru">
            <context>
                <name>MainPage</name>
                <message>
                    <location filename="../qml/MainPage.qml" line="12"/>
                    <source>Settings</source>
                    <comment>Menu</comment>
                    <translatorcomment>short please</translatorcomment>
                    <translation>Настройки</translation>
                </message>
            </context>
            </TS>
        "#};
        let document = CatalogDocument::from(Format::from_str(xml).unwrap());
        let record = &document.records[0];
        assert_eq!(record.id, "Settings");
        assert_eq!(record.comment.as_deref(), Some("Menu"));
        assert_eq!(record.translations, vec!["Настройки"]);
        assert!(!record.unfinished);
    }

    #[test]
    fn test_missing_source_is_error() {
        let xml = r#"<TS><context><message id="x"><translation>X</translation></message></context></TS>"#;
        assert!(matches!(Format::from_str(xml), Err(Error::Parse(_))));
    }

    #[test]
    fn test_truncated_document_is_error() {
        let xml = r#"<TS><context><message id="x"><source>X"#;
        assert!(Format::from_str(xml).is_err());
    }

    #[test]
    fn test_missing_language() {
        let xml = r#"<TS version="2.1"><context></context></TS>"#;
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.language, None);
        assert!(format.messages.is_empty());
    }
}
