use crate::models::Category;

/// Categories that complete an outfit built around an item of `category`
///
/// Undergarments never get recommendations.
pub fn complementary_categories(category: Category) -> &'static [Category] {
    use Category::*;

    match category {
        Tops => &[Bottoms, Shoes],
        Bottoms => &[Tops, Shoes],
        Dresses => &[Shoes, Accessories],
        Outerwear => &[Tops, Bottoms, Shoes],
        Shoes => &[Tops, Bottoms],
        Accessories => &[Tops, Bottoms, Shoes],
        Undergarments => &[],
        Activewear => &[Shoes],
    }
}
