// src/math/geometry/sphere/label.rs
use crate::math::{
    geometry::sphere::layout::PlacedPoint,
    types::Point3D,
    utils::constants::{LABEL_DISTANCE_FACTOR, LABEL_VERTICAL_OFFSET},
};
use bevy::log::warn;
use thiserror::Error;

/// Höhe der Label-Bitmap in Pixeln.
pub const LABEL_BITMAP_HEIGHT: u32 = 26;
/// Breite pro Zeichen in Pixeln (plus ein Zeichen Rand).
pub const LABEL_GLYPH_ADVANCE: u32 = 13;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabelError {
    #[error("Label text is empty")]
    EmptyText,

    #[error("No glyph for character {glyph:?}")]
    UnsupportedGlyph { glyph: char },

    #[error("Texture creation failed: {reason}")]
    TextureCreation { reason: String },
}

/// Position eines Billboard-Labels und seine Grundgröße.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub position: Point3D,
    /// Höhe des Labels in Weltkoordinaten (r / 8)
    pub unit: f32,
}

impl LabelAnchor {
    /// Skalierung des Label-Quads, Breite nach Seitenverhältnis der Bitmap.
    pub fn scale_for(&self, text: &str) -> Point3D {
        let (width, height) = label_bitmap_size(text);
        let ratio = width as f32 / height as f32;
        Point3D::new(ratio * self.unit, self.unit, self.unit)
    }
}

/// Bitmap-Größe für einen Label-Text (Breite, Höhe).
pub fn label_bitmap_size(text: &str) -> (u32, u32) {
    let chars = text.chars().count() as u32;
    (LABEL_GLYPH_ADVANCE * (chars + 1), LABEL_BITMAP_HEIGHT)
}

/// Anker knapp außerhalb der Kugel, vom Äquator weg versetzt.
pub fn place_label(point: Point3D, radius: f32) -> LabelAnchor {
    let vertical = if point.y > 0.0 {
        LABEL_VERTICAL_OFFSET
    } else if point.y < 0.0 {
        -LABEL_VERTICAL_OFFSET
    } else {
        0.0
    };

    LabelAnchor {
        position: point * LABEL_DISTANCE_FACTOR + Point3D::new(0.0, vertical, 0.0),
        unit: radius / 8.0,
    }
}

/// Erzeugt und entsorgt Label-Texturen. Wird vom Renderer bereitgestellt.
pub trait LabelRenderer {
    type Texture;

    fn render_label(&mut self, text: &str) -> Result<Self::Texture, LabelError>;

    fn release(&mut self, texture: Self::Texture);
}

/// Label-Texturen eines Layout-Durchlaufs, ein Eintrag pro Punkt.
///
/// Muss mit [`LabelSet::release`] zurückgegeben werden, wenn der Durchlauf
/// verworfen wird.
#[must_use = "label textures must be released with LabelSet::release"]
#[derive(Debug)]
pub struct LabelSet<T> {
    entries: Vec<Option<T>>,
}

impl<T> Default for LabelSet<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> LabelSet<T> {
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rendered(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn release<R: LabelRenderer<Texture = T> + ?Sized>(self, renderer: &mut R) {
        for texture in self.entries.into_iter().flatten() {
            renderer.release(texture);
        }
    }
}

/// Rendert ein Label pro Punkt. Fehlgeschlagene Labels fehlen einfach,
/// die Geometrie bleibt davon unberührt.
pub fn render_labels<R: LabelRenderer + ?Sized>(
    renderer: &mut R,
    points: &[PlacedPoint],
) -> LabelSet<R::Texture> {
    let entries = points
        .iter()
        .map(|point| match renderer.render_label(&point.label) {
            Ok(texture) => Some(texture),
            Err(err) => {
                warn!("Label for [{}] skipped: {}", point.label, err);
                None
            }
        })
        .collect();
    LabelSet { entries }
}

struct ScopedLabels<'r, R: LabelRenderer + ?Sized> {
    renderer: &'r mut R,
    labels: LabelSet<R::Texture>,
}

impl<R: LabelRenderer + ?Sized> Drop for ScopedLabels<'_, R> {
    fn drop(&mut self) {
        std::mem::take(&mut self.labels).release(self.renderer);
    }
}

/// Rendert die Labels, übergibt sie an `f` und gibt sie danach frei,
/// auch wenn `f` früh zurückkehrt oder panikt.
pub fn with_labels<R, F, T>(renderer: &mut R, points: &[PlacedPoint], f: F) -> T
where
    R: LabelRenderer + ?Sized,
    F: FnOnce(&LabelSet<R::Texture>) -> T,
{
    let labels = render_labels(renderer, points);
    let scope = ScopedLabels { renderer, labels };
    f(&scope.labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{geometry::sphere::layout::layout, types::BitVector};
    use approx::assert_abs_diff_eq;

    /// Zählt erzeugte und freigegebene Texturen.
    #[derive(Default)]
    struct CountingRenderer {
        next_id: usize,
        live: Vec<usize>,
        released: Vec<usize>,
        reject: Option<&'static str>,
    }

    impl LabelRenderer for CountingRenderer {
        type Texture = usize;

        fn render_label(&mut self, text: &str) -> Result<usize, LabelError> {
            if self.reject == Some(text) {
                return Err(LabelError::TextureCreation {
                    reason: "rejected".to_string(),
                });
            }
            let id = self.next_id;
            self.next_id += 1;
            self.live.push(id);
            Ok(id)
        }

        fn release(&mut self, texture: usize) {
            self.live.retain(|&id| id != texture);
            self.released.push(texture);
        }
    }

    fn points() -> Vec<PlacedPoint> {
        let vectors = vec![
            BitVector::from([0, 0, 0]),
            BitVector::from([1, 0, 0]),
            BitVector::from([1, 1, 0]),
            BitVector::from([1, 1, 1]),
        ];
        layout(10.0, 3, &vectors).unwrap()
    }

    #[test]
    fn test_anchor_is_pushed_outwards() {
        let north = place_label(Point3D::new(0.0, 10.0, 0.0), 10.0);
        assert_abs_diff_eq!(north.position.y, 11.02, epsilon = 1e-5);

        let south = place_label(Point3D::new(0.0, -10.0, 0.0), 10.0);
        assert_abs_diff_eq!(south.position.y, -11.02, epsilon = 1e-5);

        let equator = place_label(Point3D::new(10.0, 0.0, 0.0), 10.0);
        assert_abs_diff_eq!(equator.position.x, 11.0, epsilon = 1e-5);
        assert_eq!(equator.position.y, 0.0);
    }

    #[test]
    fn test_anchor_scale_follows_bitmap_ratio() {
        assert_eq!(label_bitmap_size("1,0,0,0,0"), (130, 26));
        let anchor = place_label(Point3D::new(0.0, 8.0, 0.0), 8.0);
        let scale = anchor.scale_for("1,0,0,0,0");
        assert_abs_diff_eq!(scale.x, 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(scale.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_failed_label_keeps_other_labels() {
        let mut renderer = CountingRenderer {
            reject: Some("1,0,0"),
            ..Default::default()
        };
        let points = points();
        let labels = render_labels(&mut renderer, &points);
        assert_eq!(labels.len(), points.len());
        assert_eq!(labels.rendered(), 3);
        assert!(labels.get(1).is_none());
        labels.release(&mut renderer);
        assert!(renderer.live.is_empty());
    }

    #[test]
    fn test_scoped_labels_are_released_on_early_return() {
        let mut renderer = CountingRenderer::default();
        let points = points();
        let result = with_labels(&mut renderer, &points, |labels| -> Result<(), String> {
            if labels.rendered() == 4 {
                return Err("renderer went away".to_string());
            }
            Ok(())
        });
        assert!(result.is_err());
        assert!(renderer.live.is_empty());
        assert_eq!(renderer.released.len(), 4);
    }

    #[test]
    fn test_scoped_labels_are_released_on_panic() {
        let mut renderer = CountingRenderer::default();
        let points = points();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            with_labels(&mut renderer, &points, |labels| {
                if labels.rendered() > 0 {
                    panic!("draw failed");
                }
            });
        }));
        assert!(outcome.is_err());
        assert!(renderer.live.is_empty());
    }
}
