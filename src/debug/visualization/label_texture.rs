// src/debug/visualization/label_texture.rs
use crate::math::geometry::sphere::label::{
    LabelError, LabelRenderer, label_bitmap_size,
};
use ab_glyph::{Font as _, FontArc, GlyphId, PxScale, ScaleFont, point};
use bevy::prelude::*;
use bevy::render::{
    render_asset::RenderAssetUsages,
    render_resource::{Extent3d, TextureDimension, TextureFormat},
};
#[cfg(test)]
use bevy::text::TextPlugin;

/// Schriftgröße der Label-Bitmap in Pixeln. Fira Mono läuft damit 12 px
/// pro Zeichen und passt in das 13 px Raster von `label_bitmap_size`.
const LABEL_FONT_PX: f32 = 20.0;

/// `max_texture_dimension_2d` der wgpu-Standardlimits.
pub const MAX_LABEL_TEXTURE_DIMENSION: u32 = 8192;

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Die mit Bevy ausgelieferte Schrift (Feature `default_font`).
pub fn default_font(fonts: &Assets<Font>) -> Option<&Font> {
    fonts.get(&Handle::<Font>::default())
}

/// RGBA-Bitmap eines Labels: weißer Hintergrund, schwarze Schrift, zentriert.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl LabelBitmap {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: BACKGROUND.repeat((width * height) as usize),
        }
    }

    /// Dunkelt ein Pixel nach Glyphen-Abdeckung ab. Außerhalb wird geclippt.
    fn ink(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let offset = ((y as u32 * self.width + x as u32) * 4) as usize;
        let value = ((1.0 - coverage.clamp(0.0, 1.0)) * 255.0).round() as u8;
        for channel in &mut self.rgba[offset..offset + 3] {
            *channel = (*channel).min(value);
        }
    }
}

/// Rastert `text` mit `font` in die feste Label-Bitmap (siehe `label_bitmap_size`).
pub fn rasterize_label(font: &FontArc, text: &str) -> Result<LabelBitmap, LabelError> {
    if text.is_empty() {
        return Err(LabelError::EmptyText);
    }
    let (width, height) = label_bitmap_size(text);
    if width > MAX_LABEL_TEXTURE_DIMENSION || height > MAX_LABEL_TEXTURE_DIMENSION {
        return Err(LabelError::TextureCreation {
            reason: format!(
                "label bitmap {width}x{height} exceeds the texture limit of {MAX_LABEL_TEXTURE_DIMENSION}"
            ),
        });
    }

    let scaled = font.as_scaled(PxScale::from(LABEL_FONT_PX));
    // Glyph-ID 0 ist `.notdef`, also nicht in der Schrift enthalten
    let ids = text
        .chars()
        .map(|c| match scaled.glyph_id(c) {
            GlyphId(0) => Err(LabelError::UnsupportedGlyph { glyph: c }),
            id => Ok(id),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let text_width: f32 = ids.iter().map(|&id| scaled.h_advance(id)).sum();
    let baseline = (height as f32 + scaled.ascent() + scaled.descent()) / 2.0;
    let mut caret = (width as f32 - text_width) / 2.0;

    let mut bitmap = LabelBitmap::blank(width, height);
    for id in ids {
        let glyph = id.with_scale_and_position(scaled.scale(), point(caret, baseline));
        caret += scaled.h_advance(id);
        // Leerzeichen haben keinen Umriss
        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|x, y, coverage| {
            bitmap.ink(
                bounds.min.x as i32 + x as i32,
                bounds.min.y as i32 + y as i32,
                coverage,
            );
        });
    }

    Ok(bitmap)
}

/// Legt Label-Bitmaps als `Image`-Assets an und entfernt sie wieder.
///
/// Ohne Schrift schlägt jedes Label mit `TextureCreation` fehl, Freigeben
/// funktioniert trotzdem.
pub struct ImageLabelRenderer<'a> {
    images: &'a mut Assets<Image>,
    font: Option<FontArc>,
}

impl<'a> ImageLabelRenderer<'a> {
    pub fn new(images: &'a mut Assets<Image>, font: Option<&Font>) -> Self {
        Self {
            images,
            font: font.map(|font| font.font.clone()),
        }
    }
}

impl LabelRenderer for ImageLabelRenderer<'_> {
    type Texture = Handle<Image>;

    fn render_label(&mut self, text: &str) -> Result<Handle<Image>, LabelError> {
        let font = self.font.as_ref().ok_or_else(|| LabelError::TextureCreation {
            reason: "label font is not loaded".to_string(),
        })?;
        let bitmap = rasterize_label(font, text)?;
        let image = Image::new(
            Extent3d {
                width: bitmap.width,
                height: bitmap.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            bitmap.rgba,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        );
        Ok(self.images.add(image))
    }

    fn release(&mut self, texture: Handle<Image>) {
        self.images.remove(&texture);
    }
}

/// Lädt die Standardschrift über einen nicht laufenden `TextPlugin`.
#[cfg(test)]
pub(crate) fn bundled_font() -> Font {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default(), TextPlugin));
    default_font(app.world.resource::<Assets<Font>>())
        .cloned()
        .expect("bevy is built with the default_font feature")
}

/// Markiert ein Label-Quad, das immer zur Kamera zeigt.
#[derive(Component, Debug)]
pub struct PointLabel;

/// Richtet alle Label-Quads an der Kamera aus.
pub fn face_camera_system(
    camera_query: Query<&Transform, (With<Camera3d>, Without<PointLabel>)>,
    mut label_query: Query<&mut Transform, With<PointLabel>>,
) {
    let Ok(camera) = camera_query.get_single() else {
        return;
    };
    for mut transform in label_query.iter_mut() {
        transform.rotation = camera.rotation;
    }
}
