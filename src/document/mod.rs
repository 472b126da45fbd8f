pub mod model;
pub mod grid;
pub mod tool;
pub mod export;
pub mod import;

use crate::config::{Config, BackgroundColor, DeviceSize};
use crate::file;
use crate::document::model::{Model, PathType};
use crate::document::grid::Grid;
use crate::document::tool::Tool;

/// The one editor session. All mutation goes through its methods,
/// synchronously, in response to input events; there is no shared or
/// background state.
pub struct Document {
    pub model :Model,
    pub grid :Grid,
    pub tool :Tool,
    pub fileinfo :file::FileInfo,

    /// Type used for the next newly created path.
    pub path_type :PathType,
    pub background :BackgroundColor,
}

impl Document {
    pub fn empty(config :&Config) -> Self {
        Self::from_model(Model::empty(), config)
    }

    pub fn from_model(model :Model, config :&Config) -> Self {
        let (w,h) = config.device.pixels();
        Document {
            model,
            grid: Grid::new(w, h),
            tool: Tool::new(),
            fileinfo: file::FileInfo::empty(),
            path_type: config.path_type,
            background: config.background,
        }
    }

    /// Starts a session from an old-format level file. Parse problems leave
    /// the session empty rather than failing.
    pub fn import_legacy(filename :&str, config :&Config) -> Self {
        let mut doc = Self::empty(config);
        doc.model = import::load_legacy(filename, &doc.grid);
        doc
    }

    /// Switching device preset rebuilds the tile dimensions; stored
    /// vertices are grid coordinates and carry over unchanged.
    pub fn set_device(&mut self, device :DeviceSize) {
        let (w,h) = device.pixels();
        self.grid = Grid::new(w, h);
    }

    pub fn level_text(&self) -> String {
        export::level_text(&self.model, &self.grid, self.background)
    }
}
