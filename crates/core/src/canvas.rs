//! Retained scene of draw primitives.
//!
//! Gauges never paint pixels; they keep a `Scene` of lines, arcs, ovals,
//! polygons and text items and update those in place, addressed by item id
//! or by tag. An embedder repaints from `items()` whenever `revision()`
//! advances, and maps each `Shape` onto whatever drawing API it owns.

use dialkit_types::Color;
use serde::{Deserialize, Serialize};

/// Handle to one scene item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(u32);

/// Font request for text items. The embedder resolves the family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    pub bold: bool,
}

impl FontSpec {
    pub fn sized(size: f64) -> Self {
        Self {
            family: String::new(),
            size,
            bold: false,
        }
    }

    pub fn bold(size: f64) -> Self {
        Self {
            family: String::new(),
            size,
            bold: true,
        }
    }
}

/// Geometry of one retained item, in scene coordinates (y grows downward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Line {
        from: (f64, f64),
        to: (f64, f64),
    },
    /// Circular arc from `start_deg` sweeping `extent_deg`, stroked along
    /// the circumference (no chord or pie closure).
    Arc {
        center: (f64, f64),
        radius: f64,
        start_deg: f64,
        extent_deg: f64,
    },
    Oval {
        center: (f64, f64),
        rx: f64,
        ry: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
    },
    Text {
        at: (f64, f64),
        content: String,
    },
}

/// Styling of one retained item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub fill: Option<Color>,
    pub outline: Option<Color>,
    pub width: f64,
    pub font: Option<FontSpec>,
    pub hidden: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: None,
            outline: None,
            width: 1.0,
            font: None,
            hidden: false,
        }
    }
}

impl Paint {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self {
            outline: Some(color),
            width,
            ..Self::default()
        }
    }
}

/// One retained item: geometry plus styling, addressable by id or tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub tag: String,
    pub shape: Shape,
    pub paint: Paint,
}

impl Item {
    /// Whether `(x, y)` falls on this item, within `tolerance`. Lines and
    /// polygons answer precisely (they are the interactive indicator
    /// shapes); ovals test the ellipse interior; arcs and text are not
    /// hit-testable.
    pub fn hit_test(&self, x: f64, y: f64, tolerance: f64) -> bool {
        if self.paint.hidden {
            return false;
        }
        match &self.shape {
            Shape::Line { from, to } => {
                let reach = tolerance + self.paint.width / 2.0;
                segment_distance(*from, *to, (x, y)) <= reach
            }
            Shape::Polygon { points } => {
                if point_in_polygon(points, (x, y)) {
                    return true;
                }
                if points.len() < 2 {
                    return false;
                }
                let closing = segment_distance(points[points.len() - 1], points[0], (x, y));
                closing <= tolerance
                    || points
                        .windows(2)
                        .any(|w| segment_distance(w[0], w[1], (x, y)) <= tolerance)
            }
            Shape::Oval { center, rx, ry } => {
                if *rx <= 0.0 || *ry <= 0.0 {
                    return false;
                }
                let dx = (x - center.0) / rx;
                let dy = (y - center.1) / ry;
                dx * dx + dy * dy <= 1.0
            }
            Shape::Arc { .. } | Shape::Text { .. } => false,
        }
    }
}

/// Item address: a single id or every item sharing a tag.
#[derive(Debug, Clone, Copy)]
pub enum ItemSelector<'a> {
    Id(ItemId),
    Tag(&'a str),
}

impl From<ItemId> for ItemSelector<'static> {
    fn from(id: ItemId) -> Self {
        ItemSelector::Id(id)
    }
}

impl<'a> From<&'a str> for ItemSelector<'a> {
    fn from(tag: &'a str) -> Self {
        ItemSelector::Tag(tag)
    }
}

/// Retained item store for one gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    items: Vec<Item>,
    background: Color,
    width: f64,
    height: f64,
    next_id: u32,
    revision: u64,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Color) -> Self {
        Self {
            items: Vec::new(),
            background,
            width,
            height,
            next_id: 1,
            revision: 0,
        }
    }

    /// Add an item and return its handle. Tags need not be unique.
    pub fn add(&mut self, tag: impl Into<String>, shape: Shape, paint: Paint) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(Item {
            id,
            tag: tag.into(),
            shape,
            paint,
        });
        self.revision += 1;
        id
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items carrying `tag`, in insertion order.
    pub fn find<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |item| item.tag == tag)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Monotonic change counter; any visible mutation advances it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_background(&mut self, color: Color) {
        if self.background != color {
            self.background = color;
            self.revision += 1;
        }
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.revision += 1;
        }
    }

    /// Replace an item's geometry (the Tk `coords` analogue).
    pub fn set_shape<'a>(&mut self, target: impl Into<ItemSelector<'a>>, shape: Shape) -> usize {
        self.mutate(target.into(), |item| item.shape = shape.clone())
    }

    pub fn set_fill<'a>(&mut self, target: impl Into<ItemSelector<'a>>, color: Color) -> usize {
        self.mutate(target.into(), |item| item.paint.fill = Some(color))
    }

    pub fn set_outline<'a>(&mut self, target: impl Into<ItemSelector<'a>>, color: Color) -> usize {
        self.mutate(target.into(), |item| item.paint.outline = Some(color))
    }

    pub fn set_width<'a>(&mut self, target: impl Into<ItemSelector<'a>>, width: f64) -> usize {
        self.mutate(target.into(), |item| item.paint.width = width)
    }

    pub fn set_hidden<'a>(&mut self, target: impl Into<ItemSelector<'a>>, hidden: bool) -> usize {
        self.mutate(target.into(), |item| item.paint.hidden = hidden)
    }

    pub fn set_font<'a>(&mut self, target: impl Into<ItemSelector<'a>>, font: FontSpec) -> usize {
        self.mutate(target.into(), |item| item.paint.font = Some(font.clone()))
    }

    /// Update the sweep of arc items; other shapes are left alone.
    pub fn set_extent<'a>(&mut self, target: impl Into<ItemSelector<'a>>, extent: f64) -> usize {
        self.mutate(target.into(), |item| {
            if let Shape::Arc { extent_deg, .. } = &mut item.shape {
                *extent_deg = extent;
            }
        })
    }

    /// Update the content of text items; other shapes are left alone.
    pub fn set_text<'a>(&mut self, target: impl Into<ItemSelector<'a>>, text: &str) -> usize {
        self.mutate(target.into(), |item| {
            if let Shape::Text { content, .. } = &mut item.shape {
                *content = text.to_string();
            }
        })
    }

    /// Whether `(x, y)` hits any item carrying `tag`.
    pub fn hit(&self, tag: &str, x: f64, y: f64, tolerance: f64) -> bool {
        self.find(tag).any(|item| item.hit_test(x, y, tolerance))
    }

    fn mutate<F: FnMut(&mut Item)>(&mut self, selector: ItemSelector, mut apply: F) -> usize {
        let mut count = 0;
        for item in self.items.iter_mut() {
            let matched = match selector {
                ItemSelector::Id(id) => item.id == id,
                ItemSelector::Tag(tag) => item.tag == tag,
            };
            if matched {
                apply(item);
                count += 1;
            }
        }
        if count > 0 {
            self.revision += 1;
        }
        count
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    let (ax, ay) = a;
    let (bx, by) = b;
    let (px, py) = p;
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let cx = ax + t * dx;
    let cy = ay + t * dy;
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Even-odd ray cast.
fn point_in_polygon(points: &[(f64, f64)], p: (f64, f64)) -> bool {
    if points.len() < 3 {
        return false;
    }
    let (px, py) = p;
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
