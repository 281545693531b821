//! Candidate images for the product image list

use crate::state::ImageRef;

/// Supplies the image to append next
pub trait ImageSource {
    /// Candidate for the slot after `current_len` existing images
    fn next_image(&self, current_len: usize) -> ImageRef;
}

const TSHIRT_SAMPLES: [&str; 5] = [
    "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?q=80&w=500",
    "https://images.unsplash.com/photo-1583743814966-8936f5b7be1a?q=80&w=500",
    "https://images.unsplash.com/photo-1562157873-818bc0726f68?q=80&w=500",
    "https://images.unsplash.com/photo-1576566588028-4147f3842f27?q=80&w=500",
    "https://images.unsplash.com/photo-1527719327859-c6ce80353573?q=80&w=500",
];

/// Fixed set of sample t-shirt photos, picked by slot
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleImages;

impl ImageSource for SampleImages {
    fn next_image(&self, current_len: usize) -> ImageRef {
        ImageRef::new(TSHIRT_SAMPLES[current_len % TSHIRT_SAMPLES.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_picks_sample() {
        let source = SampleImages;
        assert!(source.next_image(0).uri.contains("1521572163474"));
        assert!(source.next_image(4).uri.contains("1527719327859"));
    }

    #[test]
    fn test_samples_are_distinct() {
        let source = SampleImages;
        let uris: Vec<_> = (0..5).map(|i| source.next_image(i).uri).collect();
        for (i, uri) in uris.iter().enumerate() {
            assert!(!uris[i + 1..].contains(uri));
        }
    }
}
