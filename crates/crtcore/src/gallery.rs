use crate::letterbox::Vec2;

/// One displayable image: a human-readable description plus its native pixel
/// dimensions. Pixel data lives with the rendering host, indexed in parallel.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    pub desc: String,
    pub size: Vec2,
}

impl GalleryEntry {
    pub fn new(desc: impl Into<String>, size: Vec2) -> Self {
        Self {
            desc: desc.into(),
            size,
        }
    }
}

/// Ordered image list with a current selection that wraps on both ends.
#[derive(Debug)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
    current: usize,
}

impl Gallery {
    pub fn new(entries: Vec<GalleryEntry>) -> Self {
        assert!(!entries.is_empty(), "gallery requires at least one entry");
        Self {
            entries,
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &GalleryEntry {
        &self.entries[self.current]
    }

    pub fn next(&mut self) -> &GalleryEntry {
        self.current += 1;
        if self.current >= self.entries.len() {
            self.current = 0;
        }
        self.current()
    }

    pub fn prev(&mut self) -> &GalleryEntry {
        if self.current == 0 {
            self.current = self.entries.len() - 1;
        } else {
            self.current -= 1;
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Gallery {
        Gallery::new(vec![
            GalleryEntry::new("one", Vec2::new(256.0, 240.0)),
            GalleryEntry::new("two", Vec2::new(320.0, 200.0)),
            GalleryEntry::new("three", Vec2::new(160.0, 144.0)),
        ])
    }

    #[test]
    fn next_and_prev_wrap_around() {
        let mut g = gallery();
        assert_eq!(g.current().desc, "one");
        assert_eq!(g.next().desc, "two");
        assert_eq!(g.next().desc, "three");
        assert_eq!(g.next().desc, "one");
        assert_eq!(g.prev().desc, "three");
    }

    #[test]
    fn current_reports_native_size() {
        let mut g = gallery();
        g.next();
        assert_eq!(g.current().size, Vec2::new(320.0, 200.0));
    }

    #[test]
    #[should_panic(expected = "at least one entry")]
    fn rejects_empty_gallery() {
        Gallery::new(Vec::new());
    }
}
