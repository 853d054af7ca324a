use std::io::Cursor;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use super::*;
use crate::config::CaptionStyle;
use crate::foundation::error::MemeResult;
use crate::render::backend::{LineDraw, Typesetter};
use crate::render::text::BlockTypesetter;

/// Block glyphs, except a line reading "BOOM" panics mid-draw.
struct Fuse;

impl Typesetter for Fuse {
    fn measure(&mut self, text: &str, font_size: f32) -> f32 {
        BlockTypesetter.measure(text, font_size)
    }

    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        line: &LineDraw<'_>,
    ) -> MemeResult<()> {
        assert_ne!(line.text, "BOOM", "typesetter blew up");
        BlockTypesetter.draw_line(ctx, line)
    }
}

fn counting_pool(max_idle: usize) -> (CompositorPool, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let pool = CompositorPool::new(max_idle, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Compositor::new(CaptionStyle::default(), Box::new(Fuse)))
    })
    .unwrap();
    (pool, calls)
}

fn template() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(90, 60, image::Rgba([10, 20, 30, 255]));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

#[test]
fn builds_one_up_front_and_reuses_it_for_sequential_renders() {
    let (pool, calls) = counting_pool(4);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    for _ in 0..3 {
        pool.render_png(&template(), "top", "bottom").unwrap();
    }
    assert_eq!(pool.built(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(pool.idle(), 1);
}

#[test]
fn concurrent_checkouts_get_distinct_compositors() {
    let (pool, _) = counting_pool(4);
    let a = pool.checkout().unwrap();
    let b = pool.checkout().unwrap();
    assert_eq!(pool.built(), 2);
    assert_eq!(pool.idle(), 0);
    pool.release(a);
    pool.release(b);
    assert_eq!(pool.idle(), 2);
}

#[test]
fn idle_list_is_bounded() {
    let (pool, _) = counting_pool(1);
    let a = pool.checkout().unwrap();
    let b = pool.checkout().unwrap();
    pool.release(a);
    pool.release(b);
    assert_eq!(pool.idle(), 1);
}

#[test]
fn factory_errors_surface_at_construction() {
    let err = CompositorPool::new(2, || {
        Err(crate::foundation::error::MemeError::surface_unavailable(
            "no font",
        ))
    })
    .err()
    .unwrap();
    assert!(matches!(
        err,
        crate::foundation::error::MemeError::RenderSurfaceUnavailable(_)
    ));
}

#[test]
fn a_panicking_render_does_not_wedge_the_pool() {
    let (pool, _) = counting_pool(4);
    let bytes = template();

    let blown = catch_unwind(AssertUnwindSafe(|| pool.render_png(&bytes, "boom", "")));
    assert!(blown.is_err());
    assert_eq!(pool.idle(), 0);

    let out = pool.render_png(&bytes, "fine", "").unwrap();
    assert_eq!((out.width, out.height), (90, 60));
    assert_eq!(pool.built(), 2);
}
