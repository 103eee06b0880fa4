//! Sample data the site ships with.

use chrono::{DateTime, TimeZone, Utc};
use crate::models::{
    BlogPost, Difficulty, Equipment, Material, ProgressUpdate, Project, ProjectStatus,
};

pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Autumn Leaves Embroidery".to_string(),
            description: "A beautiful autumn-themed embroidery piece featuring colorful leaves and intricate stitching patterns.".to_string(),
            status: ProjectStatus::Completed,
            category: "embroidery".to_string(),
            difficulty: Difficulty::Intermediate,
            start_date: "2024-09-01".to_string(),
            completion_date: Some("2024-10-15".to_string()),
            estimated_hours: 25,
            actual_hours: Some(28),
            etsy_link: Some("https://www.etsy.com/listing/123456789/autumn-leaves-embroidery".to_string()),
            etsy_enabled: true,
            is_sold: true,
            is_featured: true,
            images: Vec::new(),
            videos: Vec::new(),
            materials: vec![
                material("Embroidery Thread", "12 skeins", 24.99, "DMC"),
                material("Linen Fabric", "1 yard", 15.50, "Joann Fabrics"),
            ],
            equipment: vec![
                equipment("Embroidery Hoop", "8-inch wooden hoop"),
                equipment("Embroidery Needles", "Size 22-26 crewel needles"),
            ],
            techniques: strings(&["French knots", "Satin stitch", "Back stitch"]),
            updates: vec![
                update("2024-09-01", "Started sketching design", "Created initial leaf pattern sketches and transferred to fabric.", 2.0),
                update("2024-09-15", "Completed first leaf", "Finished embroidering the maple leaf using satin stitch.", 6.0),
            ],
        },
        Project {
            id: 2,
            title: "Cozy Winter Scarf".to_string(),
            description: "Hand-knitted wool scarf with cable pattern perfect for cold winter days.".to_string(),
            status: ProjectStatus::InProgress,
            category: "knitting".to_string(),
            difficulty: Difficulty::Beginner,
            start_date: "2024-11-01".to_string(),
            completion_date: None,
            estimated_hours: 20,
            actual_hours: None,
            etsy_link: None,
            etsy_enabled: false,
            is_sold: false,
            is_featured: false,
            images: Vec::new(),
            videos: Vec::new(),
            materials: vec![material("Wool Yarn", "4 skeins", 32.00, "Lion Brand")],
            equipment: vec![equipment("Knitting Needles", "Size 8 circular needles")],
            techniques: strings(&["Cable knit", "Ribbing"]),
            updates: vec![update(
                "2024-11-01",
                "Cast on stitches",
                "Started with 40 stitches and began ribbing pattern.",
                1.0,
            )],
        },
        Project {
            id: 3,
            title: "Spring Garden Quilt".to_string(),
            description: "Colorful quilt featuring spring flowers and garden motifs.".to_string(),
            status: ProjectStatus::Planning,
            category: "quilting".to_string(),
            difficulty: Difficulty::Advanced,
            start_date: "2024-12-01".to_string(),
            completion_date: None,
            estimated_hours: 60,
            actual_hours: None,
            etsy_link: None,
            etsy_enabled: false,
            is_sold: false,
            is_featured: true,
            images: Vec::new(),
            videos: Vec::new(),
            materials: Vec::new(),
            equipment: Vec::new(),
            techniques: strings(&["Appliqué", "Piecing", "Machine quilting"]),
            updates: Vec::new(),
        },
    ]
}

pub fn seed_blog_posts() -> Vec<BlogPost> {
    vec![
        post(
            1,
            "Getting Started with Hand Embroidery: A Beginner's Guide",
            "Learn the basic stitches and techniques to begin your embroidery journey. From choosing the right materials to mastering your first French knot.",
            EMBROIDERY_GUIDE,
            at(2024, 10, 15, 10, 0),
            "tutorials",
            &["embroidery", "beginner", "tutorial", "stitches"],
            8,
            "getting-started-with-hand-embroidery",
        ),
        post(
            2,
            "My Vintage Embroidered Blouse Project Journey",
            "Follow along as I document the complete process of creating a vintage-inspired embroidered blouse, from initial design to final touches.",
            "This project started when I found a beautiful vintage pattern...\n\n## The pattern\n\nA floral motif traced from a 1950s transfer sheet.",
            at(2024, 10, 12, 14, 30),
            "project-stories",
            &["embroidery", "vintage", "blouse", "project"],
            12,
            "vintage-embroidered-blouse-journey",
        ),
        post(
            3,
            "Essential Tools Every Textile Crafter Needs",
            "A comprehensive guide to building your textile craft toolkit. From basic necessities to specialized equipment that can elevate your work.",
            "Having the right tools makes all the difference in textile crafts...\n\n- Sharp fabric scissors\n- A set of hoops\n- Good lighting",
            at(2024, 10, 8, 9, 15),
            "guides",
            &["tools", "equipment", "essentials", "crafting"],
            6,
            "essential-textile-craft-tools",
        ),
        post(
            4,
            "Color Theory for Textile Artists",
            "Understanding how colors work together can transform your textile projects. Learn the basics of color theory and how to apply them to your crafts.",
            "Color is one of the most powerful elements in textile design...\n\n## Complementary pairs\n\nOpposites on the wheel make each other glow.",
            at(2024, 10, 5, 16, 45),
            "techniques",
            &["color-theory", "design", "textile-art", "creativity"],
            10,
            "color-theory-for-textile-artists",
        ),
        post(
            5,
            "Sustainable Practices in Textile Crafts",
            "Explore ways to make your crafting more environmentally friendly. From choosing sustainable materials to upcycling old textiles.",
            "As crafters, we have a responsibility to consider our environmental impact...\n\n## Upcycling\n\nOld linens make excellent practice fabric.",
            at(2024, 10, 1, 11, 20),
            "sustainability",
            &["sustainability", "eco-friendly", "upcycling", "environment"],
            7,
            "sustainable-textile-crafts",
        ),
    ]
}

pub const BLOG_CATEGORIES: [(&str, &str); 6] = [
    ("all", "All Categories"),
    ("tutorials", "Tutorials"),
    ("project-stories", "Project Stories"),
    ("guides", "Guides"),
    ("techniques", "Techniques"),
    ("sustainability", "Sustainability"),
];

const EMBROIDERY_GUIDE: &str = r#"# Getting Started with Hand Embroidery: A Beginner's Guide

Embroidery is a wonderful craft that allows you to add beautiful details to fabric using just needle and thread.

## Essential Supplies

### Fabric
- **Cotton**: Great for beginners, easy to work with
- **Linen**: Provides a lovely texture and is durable
- **Muslin**: Affordable practice fabric

### Threads
- **DMC Cotton Floss**: Most popular and widely available
- **Silk Thread**: For special projects

## Basic Stitches to Master

1. **Running Stitch**: weave the needle in and out in even intervals
2. **Backstitch**: great for outlines and text
3. **French Knots**: wrap the thread around the needle 1-3 times
4. **Satin Stitch**: fill areas with solid color
5. **Chain Stitch**: linked loops for curves

## Tips for Success

- **Good lighting** is essential
- **Thread length**: use 18-inch lengths to prevent tangling
- **Practice** on scrap fabric first
"#;

const AUTHOR: &str = "CraftSyrph";

#[allow(clippy::too_many_arguments)]
fn post(
    id: u32,
    title: &str,
    excerpt: &str,
    content: &str,
    published_at: DateTime<Utc>,
    category: &str,
    tags: &[&str],
    read_time: u32,
    slug: &str,
) -> BlogPost {
    BlogPost {
        id,
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        author: AUTHOR.to_string(),
        published_at,
        updated_at: published_at,
        category: category.to_string(),
        tags: strings(tags),
        read_time,
        featured_image: "/api/placeholder/600/400".to_string(),
        slug: slug.to_string(),
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn material(name: &str, quantity: &str, cost: f64, supplier: &str) -> Material {
    Material {
        name: name.to_string(),
        quantity: quantity.to_string(),
        cost,
        supplier: supplier.to_string(),
    }
}

fn equipment(name: &str, description: &str) -> Equipment {
    Equipment {
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn update(date: &str, title: &str, content: &str, time_spent: f64) -> ProgressUpdate {
    ProgressUpdate {
        date: date.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        time_spent,
        photos: Some(Vec::new()),
        videos: None,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
