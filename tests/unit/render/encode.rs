use super::*;

fn solid(width: u32, height: u32, px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied,
    }
}

#[test]
fn png_decodes_back_to_same_size() {
    let frame = solid(5, 3, [10, 20, 30, 255], true);
    let png = encode_png(&frame).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (5, 3));
    assert_eq!(decoded.get_pixel(4, 2).0, [10, 20, 30, 255]);
}

#[test]
fn premultiplied_frames_are_unpremultiplied() {
    // 50% white, premultiplied.
    let frame = solid(1, 1, [128, 128, 128, 128], true);
    let png = encode_png(&frame).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 128]);
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 128]));
    assert_eq!(frame.pixel(1, 0), None);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let mut frame = solid(2, 2, [0, 0, 0, 255], false);
    frame.data.pop();
    assert!(encode_png(&frame).is_err());
}

#[test]
fn data_url_roundtrip() {
    let image = RenderedImage::from_frame(&solid(2, 2, [1, 2, 3, 255], false)).unwrap();
    let url = image.data_url();
    assert!(url.starts_with("data:image/png;base64,"));
    assert_eq!(decode_data_url(&url).unwrap(), image.png_bytes());
    assert!(decode_data_url("https://example.com/x.png").is_err());
}

#[test]
fn encoding_is_deterministic() {
    let frame = solid(4, 4, [9, 8, 7, 200], true);
    assert_eq!(encode_png(&frame).unwrap(), encode_png(&frame).unwrap());
}
