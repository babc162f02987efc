use base64::prelude::*;

use crate::{
    format::{self, Format},
    parse, FrequencyTable, ParseError,
};

/// A file as it was handed over by the user.
///
/// The file name doubles as the name of the dataset made from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RawUpload {
    pub fn new(
        filename: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let filename = filename.into();
        debug_assert!(!filename.is_empty(), "upload without a file name");
        RawUpload {
            filename,
            bytes: bytes.into(),
        }
    }

    /// Decode the `data:<mime>;base64,<payload>` value a browser file input
    /// produces.
    pub fn from_data_url(
        filename: impl Into<String>,
        contents: &str,
    ) -> Result<Self, ParseError> {
        let filename = filename.into();
        let Some(payload) = parse::data_url_payload(contents) else {
            return Err(ParseError::decode(
                filename,
                "upload contents are not a base64 data URL",
            ));
        };
        let bytes = BASE64_STANDARD
            .decode(payload)
            .map_err(|e| ParseError::decode(&filename, e))?;
        Ok(RawUpload::new(filename, bytes))
    }

    pub fn format(&self) -> Format {
        format::detect_format(&self.filename)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Field separator for delimited text.
    pub delimiter: u8,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { delimiter: b',' }
    }
}

/// Turns uploaded files into tag frequency tables.
#[derive(Copy, Clone, Debug, Default)]
pub struct FileParser {
    options: ParseOptions,
}

impl FileParser {
    pub fn new(options: ParseOptions) -> Self {
        FileParser { options }
    }

    pub fn parse(
        &self,
        bytes: &[u8],
        filename: &str,
    ) -> Result<FrequencyTable, ParseError> {
        let format = format::detect_format(filename);
        log::debug!("parse: reading {filename:?} as {format:?}");

        let tags = match format {
            Format::Delimited => format::read_delimited(
                filename,
                bytes,
                self.options.delimiter,
            )?,
            Format::Workbook => format::read_workbook(filename, bytes)?,
            Format::FixedWidth => format::read_fixed_width(filename, bytes)?,
        };

        Ok(FrequencyTable::from_tags(tags))
    }
}

/// Parse an upload with default options.
pub fn parse_upload(upload: &RawUpload) -> Result<FrequencyTable, ParseError> {
    FileParser::default().parse(&upload.bytes, &upload.filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TagCount;

    const SIE: &str = r##"#FLAGGA 0
#PROGRAM "Fortnox" 3.0
#FORMAT PC8
#KONTO 1930 "Företagskonto"
#KONTO 2440 "Leverantörsskulder"
#VER A 1 20240115 "Inköp"
{
   #TRANS 2440 {} -1250.00
   #TRANS 1930 {} 1250.00
}
"##;

    #[test]
    fn test_parse_csv_scenario() {
        let text =
            "#KONTO 1930 Cash\n#KONTO 1940 Bank\n{\n#TRANS 1930 100\n}\n";
        let table =
            parse_upload(&RawUpload::new("report.csv", text)).unwrap();

        assert_eq!(
            &table[..],
            &[TagCount::new("#KONTO ", 2), TagCount::new("#TRANS ", 1)]
        );
    }

    #[test]
    fn test_parse_sie_file() {
        // SIE files are conventionally in a DOS codepage, ISO-8859-1 for the
        // characters used here.
        let bytes: Vec<u8> = SIE
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap())
            .collect();
        let table = FileParser::default().parse(&bytes, "export.se").unwrap();

        assert_eq!(
            table.labels(),
            vec![
                "#KONTO ",
                "#TRANS ",
                "#FLAGGA ",
                "#PROGRAM ",
                "#FORMAT ",
                "#VER "
            ]
        );
        assert_eq!(table.counts(), vec![2, 2, 1, 1, 1, 1]);
        assert_eq!(table.total(), SIE.lines().count() - 2);
    }

    #[test]
    fn test_all_formats_normalize() {
        let text = "#KONTO 1930 Cash\n#KONTO 1940 Bank\n#RAR 0 2024\n";
        for name in ["a.csv", "a.se", "a.txt"] {
            let table = parse_upload(&RawUpload::new(name, text)).unwrap();
            assert_eq!(table.labels(), vec!["#KONTO ", "#RAR "], "{name}");
        }
    }

    #[test]
    fn test_delimiter_option() {
        let parser = FileParser::new(ParseOptions { delimiter: b';' });
        let table = parser
            .parse(b"#KONTO 1930;x\n#KONTO 1940;y\n", "semi.csv")
            .unwrap();
        assert_eq!(table.get("#KONTO "), Some(2));
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(
            parse_upload(&RawUpload::new("bad.csv", b"\xc3\x28".to_vec())),
            Err(ParseError::Decode { .. })
        ));
        assert!(matches!(
            parse_upload(&RawUpload::new("bad.xlsx", b"PK nope".to_vec())),
            Err(ParseError::Decode { .. })
        ));
        assert!(matches!(
            parse_upload(&RawUpload::new("empty.se", Vec::new())),
            Err(ParseError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_from_data_url() {
        let contents = format!(
            "data:text/csv;base64,{}",
            BASE64_STANDARD.encode("#A 1\n")
        );
        let upload = RawUpload::from_data_url("a.csv", &contents).unwrap();
        assert_eq!(upload.bytes, b"#A 1\n");
        assert_eq!(upload.format(), Format::Delimited);

        assert!(RawUpload::from_data_url("a.csv", "#A 1").is_err());
        assert!(RawUpload::from_data_url("a.csv", "data:text/csv;base64,!!")
            .is_err());
    }
}
