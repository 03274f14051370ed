//! Info command: what the renderers will see of a font

use glyphrun::error::Result;
use glyphrun::fontdb::Font;
use glyphrun::traits::FontOutlines;
use glyphrun::BoundingBox;

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let font = Font::from_file(&args.font)?;
    print!("{}", describe(&font, font.family_name()));
    Ok(())
}

fn describe(font: &dyn FontOutlines, family: Option<&str>) -> String {
    let bbox = BoundingBox::aggregate(font);
    format!(
        "Font:          {}\nFamily:        {}\nUnits per em:  {}\n\
         Glyphs:        {}\nBounding box:  {}\n",
        font.identity(),
        family.unwrap_or("(unnamed)"),
        font.units_per_em(),
        font.glyph_count(),
        bbox,
    )
}
