#![allow(dead_code)]

use lopdf::{Document as LopdfDocument, Object};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// MediaBox of every page, `[x0, y0, x1, y1]` in points.
pub fn media_boxes(doc: &LopdfDocument) -> Vec<[f32; 4]> {
    let mut boxes = Vec::new();
    for (_page_num, page_id) in doc.get_pages() {
        let Ok(page_obj) = doc.get_object(page_id) else {
            continue;
        };
        let Ok(page_dict) = page_obj.as_dict() else {
            continue;
        };
        let Ok(media_box) = page_dict.get(b"MediaBox") else {
            continue;
        };
        let Ok(values) = media_box.as_array() else {
            continue;
        };
        if values.len() == 4 {
            let mut rect = [0.0f32; 4];
            for (i, value) in values.iter().enumerate() {
                rect[i] = match value {
                    Object::Integer(n) => *n as f32,
                    Object::Real(n) => *n,
                    _ => f32::NAN,
                };
            }
            boxes.push(rect);
        }
    }
    boxes
}
