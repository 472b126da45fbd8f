use crate::config::BackgroundColor;
use crate::document::grid::Grid;
use crate::document::model::Model;

// Level metadata is fixed for now; the game reads these fields but the
// editor has no UI for them yet.
pub const LEVEL_NUM :u32 = 1;
pub const LEVEL_GOAL :u32 = 20;
pub const HAS_TUTORIAL :bool = true;
pub const TUTORIAL_TEXT :&str =
    "Touch cars to stop them. Slide cars forward to make them go faster.";

/// Renders the session as the game's level text. The layout (tabs, comma
/// placement, vertex strings) must match the old editor byte for byte;
/// vertices are written with the margin subtracted back out.
pub fn level_text(model :&Model, grid :&Grid, background :BackgroundColor) -> String {
    let mut out = String::new();
    out.push_str("{\n");
    out.push_str(&format!("\t\"levelNum\": {},\n", LEVEL_NUM));
    out.push_str(&format!("\t\"levelGoal\": {},\n", LEVEL_GOAL));
    out.push_str(&format!("\t\"hasTutorial\": {},\n", HAS_TUTORIAL));
    out.push_str(&format!("\t\"tutorialText\": \"{}\",\n", TUTORIAL_TEXT));
    out.push_str(&format!("\t\"rows\": {},\n", grid.rows));
    out.push_str(&format!("\t\"cols\": {},\n", grid.cols));
    out.push_str(&format!("\t\"backgroundColor\": \"{}\",\n", background.hex()));
    out.push_str("\t\"paths\": [");

    for (i, path) in model.paths.iter().enumerate() {
        out.push_str("{\n");
        out.push_str(&format!("\t\t\"type\": \"{}\",\n", path.kind.name()));
        out.push_str("\t\t\"segments\": [\n");

        for (j, segment) in path.segments.iter().enumerate() {
            out.push_str("\t\t\t[");
            let vertices = segment.vertices();
            for (k, vertex) in vertices.iter().enumerate() {
                out.push_str(&format!("\"{{{},{}}}\"",
                                      vertex.x - grid.margin,
                                      vertex.y - grid.margin));
                if k < vertices.len() - 1 {
                    out.push_str(", ");
                }
            }
            out.push_str("]");
            if j < path.segments.len() - 1 {
                out.push_str(", \n");
            }
        }

        out.push_str("\n\t\t]\n");
        out.push_str("\t}");
        if i < model.paths.len() - 1 {
            out.push_str(", ");
        }
    }

    out.push_str("]\n");
    out.push_str("}");
    out
}
