use log::*;
use serde::{Serialize, Deserialize};

use crate::document::model::PathType;

/// Device presets the game targets. The pixel size determines tile
/// dimensions; the grid's column/row counts are fixed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(Serialize, Deserialize)]
pub enum DeviceSize {
    IPhone4,
    IPhone5,
    IPhone6,
    IPhone6Plus,
}

pub const DEVICE_SIZES :[DeviceSize; 4] = [
    DeviceSize::IPhone4,
    DeviceSize::IPhone5,
    DeviceSize::IPhone6,
    DeviceSize::IPhone6Plus,
];

impl DeviceSize {
    pub fn name(&self) -> &'static str {
        match self {
            DeviceSize::IPhone4 => "iPhone 4/4S",
            DeviceSize::IPhone5 => "iPhone 5/5S",
            DeviceSize::IPhone6 => "iPhone 6/6S",
            DeviceSize::IPhone6Plus => "iPhone 6+/6S+",
        }
    }

    pub fn pixels(&self) -> (f64, f64) {
        match self {
            DeviceSize::IPhone4 => (480.0, 320.0),
            DeviceSize::IPhone5 => (568.0, 320.0),
            DeviceSize::IPhone6 => (667.0, 375.0),
            DeviceSize::IPhone6Plus => (736.0, 414.0),
        }
    }

    pub fn from_name(name :&str) -> Option<DeviceSize> {
        DEVICE_SIZES.iter().cloned().find(|d| d.name() == name)
    }
}

/// Background choices with their export hex values, enumerated statically
/// (the old editor looked system colors up by selector-name reflection).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(Serialize, Deserialize)]
pub enum BackgroundColor {
    Black,
    White,
    Gray,
    LightGray,
    DarkGray,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Brown,
}

pub const BACKGROUND_COLORS :[BackgroundColor; 12] = [
    BackgroundColor::Black,
    BackgroundColor::White,
    BackgroundColor::Gray,
    BackgroundColor::LightGray,
    BackgroundColor::DarkGray,
    BackgroundColor::Red,
    BackgroundColor::Green,
    BackgroundColor::Blue,
    BackgroundColor::Yellow,
    BackgroundColor::Orange,
    BackgroundColor::Purple,
    BackgroundColor::Brown,
];

impl BackgroundColor {
    pub fn name(&self) -> &'static str {
        match self {
            BackgroundColor::Black => "Black",
            BackgroundColor::White => "White",
            BackgroundColor::Gray => "Gray",
            BackgroundColor::LightGray => "Light Gray",
            BackgroundColor::DarkGray => "Dark Gray",
            BackgroundColor::Red => "Red",
            BackgroundColor::Green => "Green",
            BackgroundColor::Blue => "Blue",
            BackgroundColor::Yellow => "Yellow",
            BackgroundColor::Orange => "Orange",
            BackgroundColor::Purple => "Purple",
            BackgroundColor::Brown => "Brown",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            BackgroundColor::Black => "#000000",
            BackgroundColor::White => "#ffffff",
            BackgroundColor::Gray => "#808080",
            BackgroundColor::LightGray => "#aaaaaa",
            BackgroundColor::DarkGray => "#555555",
            BackgroundColor::Red => "#ff0000",
            BackgroundColor::Green => "#00ff00",
            BackgroundColor::Blue => "#0000ff",
            BackgroundColor::Yellow => "#ffff00",
            BackgroundColor::Orange => "#ff7f00",
            BackgroundColor::Purple => "#7f007f",
            BackgroundColor::Brown => "#996633",
        }
    }
}

/// User configuration not directly related to the model: device preset,
/// background selection, and the current path type selector.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[derive(Serialize, Deserialize)]
pub struct Config {
    pub device :DeviceSize,
    pub background :BackgroundColor,
    pub path_type :PathType,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            device: DeviceSize::IPhone4,
            background: BackgroundColor::Green,
            path_type: PathType::Road,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        confy::load(env!("CARGO_PKG_NAME")).unwrap_or_else(|e| {
            error!("Could not load config file: {}", e);
            Default::default()
        })
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(env!("CARGO_PKG_NAME"), *self) {
            error!("Could not save config file: {}", e);
        }
    }
}
