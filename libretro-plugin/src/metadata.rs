use std::ffi::c_uint;

use serde::Serialize;

use crate::sys;

/// Static description of a core, answered from `retro_get_system_info`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    pub library_name: String,
    pub library_version: String,
    /// Extensions without the leading dot, joined with `|` on the wire.
    pub valid_extensions: Vec<String>,
    /// Content must be handed over as a path instead of a memory buffer.
    pub need_fullpath: bool,
    /// Ask the frontend not to extract archives before loading them.
    pub block_extract: bool,
}

impl SystemInfo {
    pub fn extensions_joined(&self) -> String {
        self.valid_extensions.join("|")
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub base_width: u32,
    pub base_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub aspect_ratio: f32,
}

impl Geometry {
    /// Geometry of a core whose output never changes size.
    pub fn fixed(width: u32, height: u32) -> Self {
        Self {
            base_width: width,
            base_height: height,
            max_width: width,
            max_height: height,
            aspect_ratio: width as f32 / height as f32,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Timing {
    pub frames_per_second: f64,
    pub sample_rate: f64,
}

/// Answer to `retro_get_system_av_info`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct AvInfo {
    pub geometry: Geometry,
    pub timing: Timing,
}

impl AvInfo {
    pub(crate) fn to_raw(self) -> sys::retro_system_av_info {
        sys::retro_system_av_info {
            geometry: sys::retro_game_geometry {
                base_width: self.geometry.base_width,
                base_height: self.geometry.base_height,
                max_width: self.geometry.max_width,
                max_height: self.geometry.max_height,
                aspect_ratio: self.geometry.aspect_ratio,
            },
            timing: sys::retro_system_timing {
                fps: self.timing.frames_per_second,
                sample_rate: self.timing.sample_rate,
            },
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    #[default]
    Ntsc,
    Pal,
}

impl Region {
    pub fn as_raw(self) -> c_uint {
        match self {
            Region::Ntsc => sys::RETRO_REGION_NTSC,
            Region::Pal => sys::RETRO_REGION_PAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_geometry_derives_aspect_ratio() {
        let geometry = Geometry::fixed(320, 240);
        assert_eq!(geometry.max_width, 320);
        assert_eq!(geometry.max_height, 240);
        assert!((geometry.aspect_ratio - 4.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn extensions_are_pipe_separated() {
        let info = SystemInfo {
            valid_extensions: vec!["zip".to_string(), "7z".to_string()],
            ..Default::default()
        };
        assert_eq!(info.extensions_joined(), "zip|7z");
    }

    #[test]
    fn descriptors_serialize_to_json() {
        let av = AvInfo {
            geometry: Geometry::fixed(320, 240),
            timing: Timing {
                frames_per_second: 60.0,
                sample_rate: 48000.0,
            },
        };
        let json = serde_json::to_value(av).unwrap();
        assert_eq!(json["geometry"]["base_width"], 320);
        assert_eq!(json["timing"]["sample_rate"], 48000.0);
    }
}
