use serde::{Deserialize, Serialize};
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::geometry::Rect;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///Print the container dimensions and efficiency above the container
    #[serde(default = "default_true")]
    pub header: bool,
    ///Draw the drop shadow of selected and hovered items
    #[serde(default = "default_true")]
    pub shadows: bool,
    ///Attach the item tooltip as a <title> element
    #[serde(default = "default_true")]
    pub tooltips: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            header: true,
            shadows: true,
            tooltips: true,
        }
    }
}

pub fn rect_data(rect: &Rect) -> Data {
    Data::new()
        .move_to((rect.x_min, rect.y_min))
        .line_to((rect.x_max, rect.y_min))
        .line_to((rect.x_max, rect.y_max))
        .line_to((rect.x_min, rect.y_max))
        .close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}
