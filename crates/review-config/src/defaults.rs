//! The default catalog.
//!
//! Every resolution starts from [`baseline`]. The set of keys and their order
//! are part of the compatibility contract with existing settings files;
//! adding, removing, or renaming a key is a compatibility-relevant change.

use crate::types::{ConfigMap, ConfigValue};
use uuid::Uuid;

const NULL: ConfigValue = ConfigValue::Null;

fn entries<const N: usize>(pairs: [(&str, ConfigValue); N]) -> ConfigMap {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn strings(items: &[&str]) -> ConfigValue {
    ConfigValue::Array(items.iter().map(|s| ConfigValue::from(*s)).collect())
}

/// Build a fresh default catalog.
///
/// Nothing is shared between calls. `date` is today's local date and `urnid`
/// is a new random identifier each time.
pub fn baseline() -> ConfigMap {
    entries([
        // Document identity. bookname also names the EPUB file.
        ("bookname", "book".into()),
        ("booktitle", "Re:VIEW Sample Book".into()),
        ("title", NULL),
        ("aut", NULL),
        ("prt", NULL),
        ("asn", NULL),
        ("ant", NULL),
        ("clb", NULL),
        ("edt", NULL),
        ("dsr", NULL),
        ("ill", NULL),
        ("pht", NULL),
        ("trl", NULL),
        ("date", today().into()),
        ("rights", NULL),
        ("description", NULL),
        ("urnid", format!("urn:uid:{}", Uuid::new_v4()).into()),
        ("stylesheet", ConfigValue::Array(Vec::new())),
        ("coverfile", NULL),
        ("mytoc", NULL),
        ("params", "".into()),
        // Build parameters
        ("toclevel", 3.into()),
        ("secnolevel", 2.into()),
        ("epubversion", 3.into()),
        ("titlepage", true.into()),
        ("toc", NULL),
        ("colophon", NULL),
        ("debug", NULL),
        ("catalogfile", "catalog.yml".into()),
        ("language", "ja".into()),
        ("math_format", NULL),
        ("htmlext", "html".into()),
        ("htmlversion", 5.into()),
        // File and path conventions
        ("contentdir", ".".into()),
        ("imagedir", "images".into()),
        (
            "image_ext",
            strings(&["png", "gif", "jpg", "jpeg", "svg", "ttf", "woff", "otf"]),
        ),
        ("fontdir", "fonts".into()),
        ("chapter_file", "CHAPS".into()),
        ("part_file", "PART".into()),
        ("reject_file", "REJECT".into()),
        ("predef_file", "PREDEF".into()),
        ("postdef_file", "POSTDEF".into()),
        // Entry name in the page-size table
        ("page_metric", "A5".into()),
        ("ext", ".re".into()),
        (
            "image_types",
            strings(&[
                ".ai", ".psd", ".eps", ".pdf", ".tif", ".tiff", ".png", ".bmp", ".jpg", ".jpeg",
                ".gif", ".svg",
            ]),
        ),
        ("bib_file", "bib.re".into()),
        ("words_file", NULL),
        (
            "colophon_order",
            strings(&[
                "aut", "csl", "trl", "dsr", "ill", "cov", "edt", "pbl", "contact", "prt",
            ]),
        ),
        ("chapterlink", true.into()),
        ("externallink", true.into()),
        ("join_lines_by_lang", NULL),
        ("table_row_separator", "tabs".into()),
        // IDGXML
        ("tableopt", NULL),
        ("listinfo", NULL),
        ("nolf", true.into()),
        ("chapref", NULL),
        ("structuredxml", NULL),
        // DTP: 1pt = 0.3528mm, JIS: 1pt = 0.3514mm
        ("pt_to_mm_unit", 0.3528.into()),
        // LaTeX
        ("footnotetext", NULL),
        ("texcommand", "uplatex".into()),
        (
            "texoptions",
            "-interaction=nonstopmode -file-line-error -halt-on-error".into(),
        ),
        ("_texdocumentclass", strings(&["review-jsbook", ""])),
        ("texstyle", strings(&["reviewmacro"])),
        ("dvicommand", "dvipdfmx".into()),
        ("dvioptions", "-d 5 -z 9".into()),
        ("pdfmaker", pdfmaker().into()),
        ("imgmath_options", imgmath_options().into()),
        ("caption_position", caption_position().into()),
    ])
}

fn pdfmaker() -> ConfigMap {
    entries([
        ("image_scale2width", true.into()),
        ("makeindex", NULL),
        // only used when makeindex is set
        ("makeindex_command", "mendex".into()),
        ("makeindex_options", "-f -r -I utf8".into()),
        ("makeindex_sty", NULL),
        ("makeindex_dic", NULL),
        ("makeindex_mecab", true.into()),
        ("makeindex_mecab_opts", "-Oyomi".into()),
        ("use_cover_nombre", true.into()),
        ("use_original_image_size", NULL),
    ])
}

fn imgmath_options() -> ConfigMap {
    let fontsize: i32 = 10;
    entries([
        ("format", "png".into()),
        // dvipng | pdfcrop
        ("converter", "pdfcrop".into()),
        ("pdfcrop_cmd", "pdfcrop --hires %i %o".into()),
        ("extract_singlepage", NULL),
        ("pdfextract_cmd", "pdfjam -q --outfile %o %i %p".into()),
        ("preamble_file", NULL),
        ("fontsize", fontsize.into()),
        ("lineheight", (f64::from(fontsize) * 1.2).into()),
        (
            "pdfcrop_pixelize_cmd",
            "pdftocairo -%t -r 90 -f %p -l %p -singlefile %i %O".into(),
        ),
        ("dvipng_cmd", "dvipng -T tight -z 9 -p %p -l %p -o %o %i".into()),
    ])
}

fn caption_position() -> ConfigMap {
    entries([
        ("list", "top".into()),
        ("image", "bottom".into()),
        ("table", "top".into()),
        ("equation", "top".into()),
    ])
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
