use std::collections::HashMap;
use std::fmt::Write;

use sleeve_palette::Palette;

use crate::slug::sanitize_slug;
use crate::store::PaletteMap;

pub const DEFAULT_SELECTOR_PREFIX: &str = "album";

/// One rule block binding the palette to custom properties under a selector
/// scoped by the sanitized id.
pub fn rule_block(id: &str, palette: &Palette, prefix: &str) -> String {
    let prefix = sanitize_slug(prefix);
    let mut block = String::new();
    let _ = writeln!(block, ".{prefix}-{} {{", sanitize_slug(id));
    for (name, value) in [
        ("background", &palette.background),
        ("foreground", &palette.foreground),
        ("accent", &palette.accent),
        ("muted", &palette.muted),
    ] {
        let _ = writeln!(block, "  --{prefix}-{name}: {value};");
    }
    block.push('}');
    block
}

/// Stylesheet with one block per map entry, in key order.
///
/// Maps built from a [`crate::Catalog`] never have two ids with the same
/// selector; for other maps a clash is logged, and the later block wins.
pub fn render_stylesheet(map: &PaletteMap, prefix: &str) -> String {
    let mut css = String::from("/* Generated album palettes. Do not edit by hand. */\n");
    let mut selectors: HashMap<String, &str> = HashMap::new();
    for (id, palette) in map {
        if let Some(previous) = selectors.insert(sanitize_slug(id), id) {
            log::warn!("{:?} and {:?} share a selector; {:?} overrides", previous, id, id);
        }
        css.push('\n');
        css.push_str(&rule_block(id, palette, prefix));
        css.push('\n');
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_block_layout() {
        let block = rule_block("OK Computer", &Palette::fallback(), "album");
        assert_eq!(
            block,
            ".album-ok-computer {\n  --album-background: #1a1a2e;\n  --album-foreground: #ffffff;\n  --album-accent: #0066cc;\n  --album-muted: #666666;\n}"
        );
    }

    #[test]
    fn test_one_block_per_entry() {
        let mut map = PaletteMap::new();
        map.insert("b-side".to_string(), Palette::fallback());
        map.insert("a-side".to_string(), Palette::fallback());
        map.insert("Same Name".to_string(), Palette::fallback());

        let css = render_stylesheet(&map, DEFAULT_SELECTOR_PREFIX);
        assert_eq!(css.matches(" {\n").count(), 3);
        for selector in [".album-a-side {", ".album-b-side {", ".album-same-name {"] {
            assert_eq!(css.matches(selector).count(), 1);
        }
        assert!(css.find(".album-a-side").unwrap() < css.find(".album-b-side").unwrap());
        assert!(css.starts_with("/*"));
    }
}
