//! Drawable objects and their enumerated property schema.

use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::VectorContent;
use crate::error::{DesignError, DesignResult};
use crate::settings::{PluginOptions, PropValue};
use crate::transform::Decomposed;

/// Unique identifier for drawable objects. Assigned at creation, never
/// reused; duplicating an object assigns a fresh one.
pub type ObjectId = Uuid;

/// Pose attributes of an object: position, scale, rotation and flips.
///
/// `left`/`top` is the top-left corner of the scaled (unrotated) bounding
/// box; rotation is about the box center, `angle` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle: f64,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            flip_x: false,
            flip_y: false,
        }
    }
}

/// Selection chrome applied to every object when it lands on the layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStyle {
    pub border_color: String,
    pub corner_color: String,
    pub corner_size: f64,
    pub transparent_corners: bool,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            border_color: "gray".to_string(),
            corner_color: "gray".to_string(),
            corner_size: 6.0,
            transparent_corners: true,
        }
    }
}

/// Text attributes every object carries as native properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProps {
    pub text: String,
    pub font_size: f64,
    pub text_align: String,
    pub font_style: String,
    pub font_weight: String,
    pub line_height: f64,
    pub char_spacing: f64,
    pub underline: bool,
    pub linethrough: bool,
    pub overline: bool,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 16.0,
            text_align: "left".to_string(),
            font_style: "normal".to_string(),
            font_weight: "normal".to_string(),
            line_height: 1.16,
            char_spacing: 0.0,
            underline: false,
            linethrough: false,
            overline: false,
        }
    }
}

/// A drawable element on the design surface.
///
/// Owned by the object layer while present on the canvas; setting binders
/// hold shared handles to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawableObject {
    id: ObjectId,
    /// Plugin tag this object was created by (registry lookup key).
    pub kind: String,
    pub pose: Pose,
    /// Natural (unscaled) size.
    pub size: Size,
    pub content: VectorContent,
    pub options: PluginOptions,
    pub text_props: TextProps,
    /// Whether rendering is clipped to the reference frame.
    pub clipped: bool,
    pub selection_style: SelectionStyle,
    /// Cached corner coordinates for hit-testing, in world space.
    #[serde(skip)]
    coords: [Point; 4],
    /// Whether the object currently lives on a layer.
    #[serde(skip)]
    attached: bool,
    /// Ticket counter for content regenerations in flight.
    #[serde(skip)]
    revision: u64,
    /// Ticket of the last regeneration whose content was installed.
    #[serde(skip)]
    installed_revision: u64,
}

impl DrawableObject {
    /// Create a new object for the given plugin tag.
    pub fn new(kind: &str, size: Size) -> Self {
        let mut object = Self {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            pose: Pose::default(),
            size,
            content: VectorContent::default(),
            options: PluginOptions::default(),
            text_props: TextProps::default(),
            clipped: false,
            selection_style: SelectionStyle::default(),
            coords: [Point::ZERO; 4],
            attached: false,
            revision: 0,
            installed_revision: 0,
        };
        object.set_coords();
        object
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Deep-copy the object under a fresh identity. The clone starts
    /// detached from any layer.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.attached = false;
        copy
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// The center of the scaled bounding box.
    pub fn center(&self) -> Point {
        Point::new(
            self.pose.left + self.half_width(),
            self.pose.top + self.half_height(),
        )
    }

    fn half_width(&self) -> f64 {
        self.size.width * self.pose.scale_x.abs() / 2.0
    }

    fn half_height(&self) -> f64 {
        self.size.height * self.pose.scale_y.abs() / 2.0
    }

    /// The object's absolute pose within the scene, center-origin.
    ///
    /// Flips fold into negative scale, matching how the decomposition
    /// utilities report them.
    pub fn world_transform(&self) -> Affine {
        let sx = self.pose.scale_x * if self.pose.flip_x { -1.0 } else { 1.0 };
        let sy = self.pose.scale_y * if self.pose.flip_y { -1.0 } else { 1.0 };
        Affine::translate(self.center().to_vec2())
            * Affine::rotate(self.pose.angle.to_radians())
            * Affine::scale_non_uniform(sx, sy)
    }

    /// Place the object so its bounding-box center lands on `point`.
    pub fn set_position_by_center(&mut self, point: Point) {
        self.pose.left = point.x - self.half_width();
        self.pose.top = point.y - self.half_height();
    }

    /// Re-apply a decomposed world transform onto the pose.
    ///
    /// Flips are forced off before the decomposed scale lands: a flip is
    /// equivalent to the negative scale the decomposition already carries.
    pub fn apply_decomposed(&mut self, parts: &Decomposed) {
        self.pose.flip_x = false;
        self.pose.flip_y = false;
        self.pose.scale_x = parts.scale_x;
        self.pose.scale_y = parts.scale_y;
        self.pose.angle = parts.angle;
        self.set_position_by_center(Point::new(parts.translate_x, parts.translate_y));
        self.set_coords();
    }

    /// Recompute the cached corner coordinates from the current pose.
    pub fn set_coords(&mut self) {
        let transform = self.world_transform();
        let (hw, hh) = (self.size.width / 2.0, self.size.height / 2.0);
        self.coords = [
            transform * Point::new(-hw, -hh),
            transform * Point::new(hw, -hh),
            transform * Point::new(hw, hh),
            transform * Point::new(-hw, hh),
        ];
    }

    /// The cached corner coordinates, in scene space.
    pub fn coords(&self) -> &[Point; 4] {
        &self.coords
    }

    /// Axis-aligned bounding rect of the cached corners.
    pub fn bounding_rect(&self) -> Rect {
        let xs = self.coords.iter().map(|p| p.x);
        let ys = self.coords.iter().map(|p| p.y);
        Rect::new(
            xs.clone().fold(f64::INFINITY, f64::min),
            ys.clone().fold(f64::INFINITY, f64::min),
            xs.fold(f64::NEG_INFINITY, f64::max),
            ys.fold(f64::NEG_INFINITY, f64::max),
        )
    }

    /// Start a content regeneration, returning its ticket. Tickets are
    /// monotonically increasing per object.
    pub fn begin_regeneration(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    /// Install regenerated content if the ticket is still current.
    ///
    /// Returns false (a no-op) when the object has left the layer or a
    /// newer regeneration already landed.
    pub fn install_content(&mut self, ticket: u64, content: VectorContent) -> bool {
        if !self.attached || ticket < self.installed_revision {
            return false;
        }
        self.size = content.size();
        self.content = content;
        self.installed_revision = ticket;
        true
    }

    /// Seed native properties from the declared option defaults. Options
    /// without a value keep the object's own default.
    pub fn apply_native_option_defaults(&mut self) -> DesignResult<()> {
        let seeds: Vec<(String, PropValue)> = self
            .options
            .iter()
            .filter(|(_, prop)| prop.is_native)
            .filter_map(|(name, prop)| prop.value.clone().map(|v| (name.clone(), v)))
            .collect();
        for (name, value) in seeds {
            self.set(&name, value)?;
        }
        Ok(())
    }

    /// Read a native property. Unknown keys are rejected deterministically.
    pub fn get(&self, name: &str) -> DesignResult<PropValue> {
        let value = match name {
            "left" => PropValue::Number(self.pose.left),
            "top" => PropValue::Number(self.pose.top),
            "scaleX" => PropValue::Number(self.pose.scale_x),
            "scaleY" => PropValue::Number(self.pose.scale_y),
            "angle" => PropValue::Number(self.pose.angle),
            "flipX" => PropValue::Bool(self.pose.flip_x),
            "flipY" => PropValue::Bool(self.pose.flip_y),
            "text" => PropValue::Text(self.text_props.text.clone()),
            "fontSize" => PropValue::Number(self.text_props.font_size),
            "textAlign" => PropValue::Text(self.text_props.text_align.clone()),
            "fontStyle" => PropValue::Text(self.text_props.font_style.clone()),
            "fontWeight" => PropValue::Text(self.text_props.font_weight.clone()),
            "lineHeight" => PropValue::Number(self.text_props.line_height),
            "charSpacing" => PropValue::Number(self.text_props.char_spacing),
            "underline" => PropValue::Bool(self.text_props.underline),
            "linethrough" => PropValue::Bool(self.text_props.linethrough),
            "overline" => PropValue::Bool(self.text_props.overline),
            _ => {
                return Err(DesignError::UnknownProperty {
                    name: name.to_string(),
                });
            }
        };
        Ok(value)
    }

    /// Write a native property. Unknown keys and mistyped values are
    /// rejected; the object is unchanged on error.
    pub fn set(&mut self, name: &str, value: PropValue) -> DesignResult<()> {
        match name {
            "left" => self.pose.left = value.as_number(name)?,
            "top" => self.pose.top = value.as_number(name)?,
            "scaleX" => self.pose.scale_x = value.as_number(name)?,
            "scaleY" => self.pose.scale_y = value.as_number(name)?,
            "angle" => self.pose.angle = value.as_number(name)?,
            "flipX" => self.pose.flip_x = value.as_bool(name)?,
            "flipY" => self.pose.flip_y = value.as_bool(name)?,
            "text" => self.text_props.text = value.as_text(name)?,
            "fontSize" => self.text_props.font_size = value.as_number(name)?,
            "textAlign" => self.text_props.text_align = value.as_text(name)?,
            "fontStyle" => self.text_props.font_style = value.as_text(name)?,
            "fontWeight" => self.text_props.font_weight = value.as_text(name)?,
            "lineHeight" => self.text_props.line_height = value.as_number(name)?,
            "charSpacing" => self.text_props.char_spacing = value.as_number(name)?,
            "underline" => self.text_props.underline = value.as_bool(name)?,
            "linethrough" => self.text_props.linethrough = value.as_bool(name)?,
            "overline" => self.text_props.overline = value.as_bool(name)?,
            _ => {
                return Err(DesignError::UnknownProperty {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}
