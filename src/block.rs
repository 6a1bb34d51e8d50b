//! Users and time blocks as the dashboard API sends and accepts them.

use chrono::Duration;
use palette::rgb::Rgba;
use palette::{Hsv, RgbHue};

use std::fmt;

use datetime::parse_transport;
use error::FormatError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    /// Filled in by the with-reservations listing from the user's block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

/// The API sends either the user's id or the whole user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttachedUser {
    Embedded(User),
    Id(String),
}

impl AttachedUser {
    pub fn id(&self) -> &str {
        match *self {
            AttachedUser::Embedded(ref user) => &user.id,
            AttachedUser::Id(ref id) => id,
        }
    }

    /// Something a person can read: the name if embedded, the id otherwise.
    pub fn label(&self) -> &str {
        match *self {
            AttachedUser::Embedded(ref user) => &user.name,
            AttachedUser::Id(ref id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub attached_user: Option<AttachedUser>,
    #[serde(default)]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl TimeBlock {
    /// Wall-clock length of the block, date components included.
    pub fn duration(&self) -> Result<Duration, FormatError> {
        let start = parse_transport(&self.start_time)?;
        let end = parse_transport(&self.end_time)?;
        Ok(end.signed_duration_since(start))
    }

    pub fn user_label(&self) -> &str {
        self.attached_user
            .as_ref()
            .map(|user| user.label())
            .unwrap_or("")
    }
}

/// Activity category of a block. Drives the color it is drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    Trabajo,
    Descanso,
    Comida,
    Reunion,
    Other(String),
}

impl Default for Style {
    fn default() -> Self {
        Style::Other(String::new())
    }
}

impl Style {
    pub fn as_str(&self) -> &str {
        match *self {
            Style::Trabajo => "trabajo",
            Style::Descanso => "descanso",
            Style::Comida => "comida",
            Style::Reunion => "reunión",
            Style::Other(ref tag) => tag,
        }
    }

    /// Fill and border colors. Unknown tags are gray.
    pub fn colors(&self) -> BlockColors {
        let hue = match *self {
            Style::Trabajo => Some(213.0),
            Style::Descanso => Some(142.0),
            Style::Comida => Some(27.0),
            Style::Reunion => Some(270.0),
            Style::Other(_) => None,
        };

        match hue {
            Some(hue) => BlockColors {
                background: hsv_to_rgb(hue, 0.35, 0.98),
                border: hsv_to_rgb(hue, 0.55, 0.85),
            },
            None => BlockColors {
                background: hsv_to_rgb(0.0, 0.0, 0.84),
                border: hsv_to_rgb(0.0, 0.0, 0.66),
            },
        }
    }
}

impl<'a> From<&'a str> for Style {
    fn from(tag: &'a str) -> Self {
        match tag {
            "trabajo" => Style::Trabajo,
            "descanso" => Style::Descanso,
            "comida" => Style::Comida,
            "reunión" => Style::Reunion,
            other => Style::Other(other.to_owned()),
        }
    }
}

impl From<String> for Style {
    fn from(tag: String) -> Self {
        Style::from(tag.as_str())
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        style.as_str().to_owned()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockColors {
    pub background: (u8, u8, u8),
    pub border: (u8, u8, u8),
}

fn hsv_to_rgb(hue_degrees: f32, saturation: f32, value: f32) -> (u8, u8, u8) {
    let color_hsv = Hsv::new(
        RgbHue::from_radians(hue_degrees.to_radians()),
        saturation,
        value,
    );
    let color_rgb: Rgba = color_hsv.into();
    let color_tuple: (f32, f32, f32, f32) = color_rgb.into_components();
    (
        channel(color_tuple.0),
        channel(color_tuple.1),
        channel(color_tuple.2),
    )
}

fn channel(component: f32) -> u8 {
    (component.max(0.0).min(1.0) * 255.0).round() as u8
}
