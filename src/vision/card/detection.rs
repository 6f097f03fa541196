// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Quadrilateral search for card detection

use image::{DynamicImage, GrayImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::morphology::dilate;
use imageproc::point::Point;
use tracing::debug;

use super::CardDetectionOptions;

const BLUR_SIGMA: f32 = 1.5;
const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;
/// Douglas-Peucker tolerance relative to the contour perimeter
const POLY_EPSILON_RATIO: f64 = 0.02;

/// Four corners ordered top-left, top-right, bottom-right, bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub corners: [(f32, f32); 4],
}

impl Quad {
    /// Order four arbitrary points into TL, TR, BR, BL.
    ///
    /// Returns `None` when the points do not map to four distinct corners.
    pub fn from_points(points: [(f32, f32); 4]) -> Option<Self> {
        let by = |key: fn(&(f32, f32)) -> f32, max: bool| {
            let iter = points.iter().enumerate();
            let pick = if max {
                iter.max_by(|a, b| key(a.1).total_cmp(&key(b.1)))
            } else {
                iter.min_by(|a, b| key(a.1).total_cmp(&key(b.1)))
            };
            pick.map(|(i, _)| i)
        };

        let tl = by(|p| p.0 + p.1, false)?;
        let br = by(|p| p.0 + p.1, true)?;
        let tr = by(|p| p.0 - p.1, true)?;
        let bl = by(|p| p.0 - p.1, false)?;

        let mut seen = [false; 4];
        for i in [tl, tr, br, bl] {
            if seen[i] {
                return None;
            }
            seen[i] = true;
        }

        Some(Self {
            corners: [points[tl], points[tr], points[br], points[bl]],
        })
    }

    /// Polygon area (shoelace)
    pub fn area(&self) -> f32 {
        let c = &self.corners;
        let mut sum = 0.0;
        for i in 0..4 {
            let (x1, y1) = c[i];
            let (x2, y2) = c[(i + 1) % 4];
            sum += x1 * y2 - x2 * y1;
        }
        sum.abs() / 2.0
    }

    /// Mean horizontal edge length over mean vertical edge length
    pub fn aspect_ratio(&self) -> f32 {
        let [tl, tr, br, bl] = self.corners;
        let width = (distance(tl, tr) + distance(bl, br)) / 2.0;
        let height = (distance(tl, bl) + distance(tr, br)) / 2.0;
        if height <= f32::EPSILON {
            return f32::INFINITY;
        }
        width / height
    }

    /// Largest deviation of any interior angle from a right angle, in degrees
    pub fn max_corner_deviation(&self) -> f32 {
        (0..4)
            .map(|i| {
                let prev = self.corners[(i + 3) % 4];
                let here = self.corners[i];
                let next = self.corners[(i + 1) % 4];
                (corner_angle(prev, here, next) - 90.0).abs()
            })
            .fold(0.0, f32::max)
    }
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn corner_angle(prev: (f32, f32), here: (f32, f32), next: (f32, f32)) -> f32 {
    let u = (prev.0 - here.0, prev.1 - here.1);
    let v = (next.0 - here.0, next.1 - here.1);
    let norm = (u.0.hypot(u.1)) * (v.0.hypot(v.1));
    if norm <= f32::EPSILON {
        return 0.0;
    }
    let cos = ((u.0 * v.0 + u.1 * v.1) / norm).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Edge map used for contour tracing
fn edge_map(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let blurred = gaussian_blur_f32(&gray, BLUR_SIGMA);
    let edges = canny(&blurred, CANNY_LOW, CANNY_HIGH);
    // Close single-pixel gaps so card outlines trace as one contour
    dilate(&edges, Norm::LInf, 1)
}

/// Find the most prominent card-like quadrilateral in `image`.
///
/// Candidates are outer contours that simplify to four corners, cover at
/// least `min_area_fraction` of the image, fall inside the aspect-ratio band
/// and have near-right corners. The largest candidate wins.
pub fn find_card_quad(image: &DynamicImage, options: &CardDetectionOptions) -> Option<Quad> {
    let (width, height) = (image.width(), image.height());
    if width < 4 || height < 4 {
        return None;
    }

    let edges = edge_map(image);
    let contours = find_contours::<i32>(&edges);
    let min_area = width as f32 * height as f32 * options.min_area_fraction;

    let mut best: Option<Quad> = None;
    let mut examined = 0usize;

    for contour in contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.points.len() >= 4)
    {
        examined += 1;
        let perimeter = arc_length(&contour.points, true);
        let approx: Vec<Point<i32>> =
            approximate_polygon_dp(&contour.points, perimeter * POLY_EPSILON_RATIO, true);
        if approx.len() != 4 {
            continue;
        }

        let points = [
            (approx[0].x as f32, approx[0].y as f32),
            (approx[1].x as f32, approx[1].y as f32),
            (approx[2].x as f32, approx[2].y as f32),
            (approx[3].x as f32, approx[3].y as f32),
        ];
        let Some(quad) = Quad::from_points(points) else {
            continue;
        };

        let area = quad.area();
        if area < min_area {
            continue;
        }

        let ratio = quad.aspect_ratio();
        if ratio < options.min_aspect_ratio || ratio > options.max_aspect_ratio {
            continue;
        }

        if quad.max_corner_deviation() > options.quadrature_tolerance_degrees {
            continue;
        }

        if best.map_or(true, |b| area > b.area()) {
            best = Some(quad);
        }
    }

    debug!(
        contours = examined,
        found = best.is_some(),
        "Card quadrilateral search complete"
    );

    best
}
