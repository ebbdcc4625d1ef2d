//! DXF code page ($DWGCODEPAGE) to encoding mapping.
//!
//! Maps the code page names AutoCAD writes into `$DWGCODEPAGE` to
//! `encoding_rs` encodings. DOS code pages that `encoding_rs` does not carry
//! map to the Windows code page covering the same script.

use encoding_rs::Encoding;

/// Get the `encoding_rs` encoding for a DXF code page name.
///
/// Matching is case-insensitive. Returns `None` when the name is not known;
/// the caller then keeps the encoding it already had.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    let encoding = match code_page.trim().to_ascii_uppercase().as_str() {
        "ASCII" | "ANSI_1252" | "DOS437" | "DOS850" | "DOS860" | "DOS861" | "DOS863"
        | "DOS865" | "8859_1" | "ISO8859-1" => encoding_rs::WINDOWS_1252,
        "MACINTOSH" => encoding_rs::MACINTOSH,

        "ANSI_874" => encoding_rs::WINDOWS_874,
        "ANSI_1250" | "DOS852" => encoding_rs::WINDOWS_1250,
        "ANSI_1251" | "DOS855" => encoding_rs::WINDOWS_1251,
        "DOS866" => encoding_rs::IBM866,
        "ANSI_1253" | "DOS869" => encoding_rs::WINDOWS_1253,
        "ANSI_1254" | "DOS857" | "8859_9" | "ISO8859-9" => encoding_rs::WINDOWS_1254,
        "ANSI_1255" => encoding_rs::WINDOWS_1255,
        "ANSI_1256" | "DOS864" => encoding_rs::WINDOWS_1256,
        "ANSI_1257" => encoding_rs::WINDOWS_1257,
        "ANSI_1258" => encoding_rs::WINDOWS_1258,

        "8859_2" | "ISO8859-2" => encoding_rs::ISO_8859_2,
        "8859_3" | "ISO8859-3" => encoding_rs::ISO_8859_3,
        "8859_4" | "ISO8859-4" => encoding_rs::ISO_8859_4,
        "8859_5" | "ISO8859-5" => encoding_rs::ISO_8859_5,
        "8859_6" | "ISO8859-6" => encoding_rs::ISO_8859_6,
        "8859_7" | "ISO8859-7" => encoding_rs::ISO_8859_7,
        "8859_8" | "ISO8859-8" => encoding_rs::ISO_8859_8,

        "ANSI_932" | "DOS932" => encoding_rs::SHIFT_JIS,
        "ANSI_936" | "GB2312" => encoding_rs::GBK,
        "ANSI_949" | "KSC5601" | "ANSI_1361" | "JOHAB" => encoding_rs::EUC_KR,
        "ANSI_950" | "BIG5" => encoding_rs::BIG5,
        _ => return None,
    };
    Some(encoding)
}
