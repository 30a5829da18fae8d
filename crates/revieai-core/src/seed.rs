//! Built-in catalogue: the one product on display and its opening reviews.

use crate::review::{Product, Review, Sentiment};

/// The product every review belongs to.
pub fn mock_product() -> Product {
    Product {
        id: "p1".into(),
        name: "RevieAI Pro Wireless Headphones".into(),
        brand: "Acoustix".into(),
        description: "Experience studio-quality sound with adaptive noise cancellation and \
                      40-hour battery life."
            .into(),
        price: 299.99,
        image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?auto=format&fit=crop&q=80&w=1000"
            .into(),
        category: "Electronics".into(),
        average_rating: 4.8,
        total_reviews: 124,
    }
}

/// Reviews present at startup, most recent first.
pub fn initial_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "1".into(),
            author: "Sarah Jenkins".into(),
            rating: 5,
            date: "March 12, 2024".into(),
            title: "Crystal Clear Audio!".into(),
            comment: "The noise cancellation on these is absolutely incredible. I use them for \
                      my daily commute and the train sounds completely disappear. Battery life \
                      is as advertised."
                .into(),
            avatar: Some("https://picsum.photos/seed/sarah/100/100".into()),
            images: None,
            sentiment: Some(Sentiment::Positive),
            tags: None,
            likes: 42,
            merchant_reply: None,
        },
        Review {
            id: "2".into(),
            author: "Michael Chen".into(),
            rating: 4,
            date: "February 28, 2024".into(),
            title: "Solid build, slightly heavy".into(),
            comment: "Great sound stage and the bass is punchy without being muddy. My only \
                      complaint is they feel a bit heavy after wearing them for more than 3 hours."
                .into(),
            avatar: Some("https://picsum.photos/seed/michael/100/100".into()),
            images: None,
            sentiment: Some(Sentiment::Neutral),
            tags: None,
            likes: 15,
            merchant_reply: None,
        },
        Review {
            id: "3".into(),
            author: "David Rodriguez".into(),
            rating: 2,
            date: "January 15, 2024".into(),
            title: "Bluetooth issues".into(),
            comment: "The sound is okay but I keep experiencing drops in connection when my phone \
                      is in my pocket. Re-pairing helps but it happens at least once a day."
                .into(),
            avatar: Some("https://picsum.photos/seed/david/100/100".into()),
            images: None,
            sentiment: Some(Sentiment::Negative),
            tags: None,
            likes: 8,
            merchant_reply: Some(
                "We are sorry to hear about your connection issues, David. Our latest firmware \
                 update addresses Bluetooth stability. Please check the Acoustix app for updates!"
                    .into(),
            ),
        },
    ]
}
