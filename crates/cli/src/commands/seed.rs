//! Seed the document store with the demo catalog and content.
//!
//! Seeding is an upsert under fixed ids, so re-running it refreshes the demo
//! data without duplicating documents. Orders and users are never seeded.

use chrono::Utc;
use rust_decimal::{Decimal, dec};
use serde_json::json;
use tracing::info;

use driftwood_core::blog::BlogPost;
use driftwood_core::catalog::{Product, ProductImage, Seo, Variant};
use driftwood_core::pricing::Discount;
use driftwood_core::types::{PostId, ProductId, VariantId};

use super::{CliError, docstore_from_env};

/// Upsert the demo catalog, blog posts, and settings.
///
/// # Errors
///
/// Returns an error if the store rejects any write.
pub async fn run() -> Result<(), CliError> {
    let store = docstore_from_env()?;

    let products = demo_products();
    for product in &products {
        store.products().put(product).await?;
        info!("Seeded product {} ({})", product.slug, product.id);
    }

    let posts = demo_posts();
    for post in &posts {
        store.blog_posts().put(post).await?;
        info!("Seeded blog post {} ({})", post.slug, post.id);
    }

    store
        .settings()
        .update(&json!({
            "store_name": "Driftwood",
            "tagline": "Quiet goods for slow homes",
            "contact_email": "hello@driftwood.example",
            "free_shipping_threshold": "150",
        }))
        .await?;
    info!("Seeded settings");

    info!(
        "Seed complete: {} products, {} posts",
        products.len(),
        posts.len()
    );
    Ok(())
}

fn variant(
    id: &str,
    size: Option<&str>,
    color: Option<&str>,
    price: Option<Decimal>,
    stock: Option<u32>,
) -> Variant {
    Variant {
        id: VariantId::new(id),
        size: size.map(str::to_owned),
        color: color.map(str::to_owned),
        material: None,
        thickness: None,
        price,
        stock,
    }
}

#[allow(clippy::too_many_lines)]
fn demo_products() -> Vec<Product> {
    let now = Utc::now();
    let base = |id: &str, name: &str, slug: &str, category: &str, price: Decimal| Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        slug: slug.to_owned(),
        description: String::new(),
        base_price: price,
        discount: None,
        category: category.to_owned(),
        stock: 0,
        rating: None,
        images: Vec::new(),
        primary_image: 0,
        variants: Vec::new(),
        enabled: true,
        featured: false,
        bestseller: false,
        seo: Seo::default(),
        created_at: Some(now),
        updated_at: Some(now),
    };

    let mut juniper = base("prod_juniper_rug", "Juniper Wool Rug", "juniper-wool-rug", "rugs", dec!(420));
    juniper.description = "Hand-loomed wool rug in undyed natural tones.".to_owned();
    juniper.discount = Some(Discount::percentage(dec!(20)));
    juniper.stock = 6;
    juniper.rating = Some(dec!(4.7));
    juniper.featured = true;
    juniper.images = vec![ProductImage {
        url: "https://cdn.driftwood.example/juniper-rug.jpg".to_owned(),
        alt: Some("Juniper wool rug on oak floor".to_owned()),
    }];
    juniper.variants = vec![
        variant("var_juniper_s", Some("120x180"), None, Some(dec!(290)), Some(4)),
        variant("var_juniper_l", Some("200x300"), None, None, Some(2)),
    ];

    let mut alder = base("prod_alder_bench", "Alder Bench", "alder-bench", "furniture", dec!(240));
    alder.description = "Solid alder entry bench, oiled finish.".to_owned();
    alder.stock = 3;
    alder.rating = Some(dec!(4.9));
    alder.bestseller = true;
    alder.images = vec![ProductImage {
        url: "https://cdn.driftwood.example/alder-bench.jpg".to_owned(),
        alt: None,
    }];

    let mut birch = base("prod_birch_table", "Birch Side Table", "birch-side-table", "furniture", dec!(129));
    birch.description = "Compact side table in white birch.".to_owned();
    birch.stock = 10;
    birch.rating = Some(dec!(4.2));

    let mut lamp = base("prod_kelp_lamp", "Kelp Pendant Lamp", "kelp-pendant-lamp", "lighting", dec!(185));
    lamp.description = "Woven seagrass pendant shade with a warm cast.".to_owned();
    lamp.discount = Some(Discount::flat(dec!(35)));
    lamp.stock = 8;
    lamp.rating = Some(dec!(4.5));
    lamp.featured = true;

    let mut linen = base("prod_shore_linen", "Shore Linen Duvet", "shore-linen-duvet", "bedding", dec!(210));
    linen.description = "Stonewashed linen duvet cover.".to_owned();
    linen.stock = 0;
    linen.rating = Some(dec!(4.8));
    linen.bestseller = true;
    linen.variants = vec![
        variant("var_linen_q", Some("Queen"), Some("Oat"), None, Some(5)),
        variant("var_linen_k", Some("King"), Some("Oat"), Some(dec!(240)), Some(3)),
        variant("var_linen_qf", Some("Queen"), Some("Fog"), None, Some(0)),
    ];

    let mut candle = base("prod_tide_candle", "Tide Candle", "tide-candle", "accessories", dec!(28));
    candle.description = "Beeswax candle with juniper and salt notes.".to_owned();
    candle.stock = 40;
    candle.rating = Some(dec!(4.1));

    vec![juniper, alder, birch, lamp, linen, candle]
}

fn demo_posts() -> Vec<BlogPost> {
    let now = Utc::now();
    let post = |id: &str, title: &str, slug: &str, excerpt: &str| BlogPost {
        id: PostId::new(id),
        title: title.to_owned(),
        slug: slug.to_owned(),
        author: "Mara Ellis".to_owned(),
        excerpt: excerpt.to_owned(),
        content: format!("{excerpt}\n\nFull article coming from the content team."),
        image: None,
        featured: false,
        seo: Seo::default(),
        created_at: Some(now),
        updated_at: Some(now),
    };

    let mut caring = post(
        "post_wool_care",
        "Caring for wool rugs",
        "caring-for-wool-rugs",
        "Undyed wool asks for little: air, shade, and a soft brush.",
    );
    caring.featured = true;

    vec![
        caring,
        post(
            "post_linen_seasons",
            "Linen through the seasons",
            "linen-through-the-seasons",
            "Why stonewashed linen sleeps cool in July and warm in January.",
        ),
        post(
            "post_slow_light",
            "Slow light",
            "slow-light",
            "Choosing lamps for rooms you want to wind down in.",
        ),
    ]
}
