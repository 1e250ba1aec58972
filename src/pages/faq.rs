use leptos::prelude::*;
use std::collections::HashSet;

struct FaqItem {
    question: &'static str,
    answer: &'static str,
}

struct FaqSection {
    category: &'static str,
    items: &'static [FaqItem],
}

const FAQ: &[FaqSection] = &[
    FaqSection {
        category: "Getting Started",
        items: &[
            FaqItem {
                question: "What is VIMM?",
                answer: "VIMM is a decentralized streaming platform built on the Hive blockchain. It allows content creators to stream live video while earning cryptocurrency rewards from their audience. Unlike traditional platforms, VIMM gives creators full ownership of their content and direct monetization without intermediaries.",
            },
            FaqItem {
                question: "How do I create an account?",
                answer: "To join VIMM, you need a Hive blockchain account. Click the 'Login with Hive' button and use your existing Hive account, or create a new one through services like Hive Onboard. Your Hive account serves as your VIMM identity, giving you access to all platform features.",
            },
            FaqItem {
                question: "Is VIMM free to use?",
                answer: "Yes! Watching streams on VIMM is completely free. Creating an account and following streamers is also free. However, some features like tipping streamers or certain premium interactions may require small amounts of Hive cryptocurrency.",
            },
        ],
    },
    FaqSection {
        category: "Streaming",
        items: &[
            FaqItem {
                question: "How do I start streaming?",
                answer: "After logging in, go to your Channel Settings to configure your stream. Generate a stream key, set up your streaming software (like OBS), and start broadcasting. Make sure to set an engaging title and select the appropriate category for your content.",
            },
            FaqItem {
                question: "What streaming software can I use?",
                answer: "VIMM works with any RTMP-compatible streaming software including OBS Studio, Streamlabs, XSplit, and more. OBS Studio is free and highly recommended for beginners. Simply use your VIMM stream key and server URL in your streaming software settings.",
            },
            FaqItem {
                question: "Are there any streaming restrictions?",
                answer: "VIMM follows community guidelines that prohibit illegal content, harassment, and spam. Content should be appropriate for the platform's diverse audience. Specific streaming quality and duration limits may apply to new accounts, which are lifted as you build reputation on the platform.",
            },
            FaqItem {
                question: "How do I earn from streaming?",
                answer: "Streamers can earn through various methods: viewer tips in Hive cryptocurrency, community upvotes that provide Hive rewards, sponsored content, and direct support from followers. The decentralized nature means you keep more of your earnings compared to traditional platforms.",
            },
        ],
    },
    FaqSection {
        category: "Watching & Following",
        items: &[
            FaqItem {
                question: "How do I follow streamers?",
                answer: "Click the Follow button on any stream or in the directory to follow a streamer. Followed streamers appear on your 'Following' page, where you can see who's live right now.",
            },
            FaqItem {
                question: "Can I watch streams without an account?",
                answer: "Yes! You can watch any public stream without creating an account. However, you'll need a Hive account to follow streamers, participate in chat, tip creators, or access personalized features like your following list.",
            },
            FaqItem {
                question: "How do I tip streamers?",
                answer: "When logged in, you can tip streamers using Hive cryptocurrency. Look for the tip button during streams or visit their profile. Tips are sent directly to the streamer's Hive wallet, supporting them directly without platform fees.",
            },
        ],
    },
    FaqSection {
        category: "Technical",
        items: &[
            FaqItem {
                question: "What video quality does VIMM support?",
                answer: "VIMM supports multiple streaming resolutions including 720p and 1080p. The platform automatically adjusts video quality based on your internet connection. Streamers can broadcast in various bitrates, and viewers can select their preferred quality when available.",
            },
            FaqItem {
                question: "Why is my stream lagging or buffering?",
                answer: "Stream quality depends on both the streamer's upload speed and your internet connection. Try refreshing the page, lowering video quality if available, or checking your internet connection. Streamers experiencing issues should verify their upload speed and streaming software settings.",
            },
            FaqItem {
                question: "Is there a mobile app?",
                answer: "Currently, VIMM is available as a web application that works on mobile browsers. You can add VIMM to your phone's home screen through your browser's 'Add to Home Screen' option for a more app-like experience.",
            },
            FaqItem {
                question: "What browsers are supported?",
                answer: "VIMM works best on modern browsers including Chrome, Firefox, Safari, and Edge. Make sure your browser is up to date and has JavaScript enabled. Some older browsers may have limited functionality or compatibility issues.",
            },
        ],
    },
    FaqSection {
        category: "Hive Blockchain",
        items: &[
            FaqItem {
                question: "What is Hive blockchain?",
                answer: "Hive is a fast, fee-less blockchain designed for social media and content creation. It powers VIMM's decentralized infrastructure, enabling direct creator monetization and true content ownership. Transactions on Hive are free and typically confirm within 3 seconds.",
            },
            FaqItem {
                question: "Do I need to understand cryptocurrency?",
                answer: "While basic knowledge helps, you don't need to be a crypto expert to use VIMM. The platform handles most blockchain interactions automatically. You'll mainly interact with Hive when receiving tips or rewards, which are stored in your Hive wallet.",
            },
            FaqItem {
                question: "How do I manage my Hive wallet?",
                answer: "Your Hive wallet is separate from VIMM but connected to your account. You can manage it through Hive wallet applications like Hive Keychain, PeakD, or Hive.blog. These tools let you view balances, make transfers, and manage your cryptocurrency.",
            },
            FaqItem {
                question: "What are Hive rewards?",
                answer: "Hive rewards are earned when community members upvote your content or streams. These rewards are distributed automatically after 7 days and appear in your Hive wallet. The amount depends on the voting power and stake of users who upvoted your content.",
            },
        ],
    },
    FaqSection {
        category: "Community & Safety",
        items: &[
            FaqItem {
                question: "How do I report inappropriate content?",
                answer: "If you encounter content that violates community guidelines, use the report function available on streams and profiles. Reports are reviewed by community moderators. You can also block users to prevent seeing their content in your feeds.",
            },
            FaqItem {
                question: "What are the community guidelines?",
                answer: "VIMM promotes a respectful, inclusive environment. Prohibited content includes harassment, hate speech, illegal activities, spam, and inappropriate material. Creators should respect intellectual property rights and maintain appropriate content standards for all audiences.",
            },
            FaqItem {
                question: "How does moderation work?",
                answer: "VIMM uses a combination of community reporting, automated systems, and human moderators to maintain platform standards. Channel owners and their moderators manage their own chat with slow mode, follower-only mode, timeouts and bans.",
            },
        ],
    },
];

/// (section, item)
type ItemKey = (usize, usize);

fn toggle(open: &mut HashSet<ItemKey>, key: ItemKey) {
    if !open.remove(&key) {
        open.insert(key);
    }
}

#[component]
pub fn Faq() -> impl IntoView {
    let open = RwSignal::new(HashSet::<ItemKey>::new());

    view! {
        <div class="p-6 max-w-4xl mx-auto space-y-8">
            <header class="text-center">
                <h1 class="text-3xl font-bold text-seafoam-600 dark:text-mint-400">"Frequently Asked Questions"</h1>
                <p class="text-gray-600 dark:text-gray-300">
                    "Find answers to common questions about VIMM streaming platform"
                </p>
            </header>

            {FAQ
                .iter()
                .enumerate()
                .map(|(s, section)| {
                    view! {
                        <section class="space-y-2">
                            <h2 class="text-xl font-semibold text-teal-700 dark:text-aqua-300">{section.category}</h2>
                            {section
                                .items
                                .iter()
                                .enumerate()
                                .map(|(i, item)| {
                                    let key = (s, i);
                                    let is_open = move || open.with(|o| o.contains(&key));
                                    view! {
                                        <div class="rounded-lg bg-white dark:bg-teal-800 shadow">
                                            <button
                                                class="w-full flex items-center justify-between px-4 py-3 text-left font-medium"
                                                aria-expanded=move || is_open().to_string()
                                                on:click=move |_| open.update(|o| toggle(o, key))
                                            >
                                                <span>{item.question}</span>
                                                <span class="text-xl">{move || if is_open() { "−" } else { "+" }}</span>
                                            </button>
                                            <Show when=is_open>
                                                <p class="px-4 pb-4 text-gray-600 dark:text-gray-300">{item.answer}</p>
                                            </Show>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </section>
                    }
                })
                .collect_view()}

            <footer class="text-center space-y-2 text-sm text-gray-600 dark:text-gray-300">
                <h3 class="text-lg font-semibold">"Still have questions?"</h3>
                <p>
                    "Can't find what you're looking for? Join our community on "
                    <a href="https://discord.gg/vimm" target="_blank" rel="noopener noreferrer" class="underline">"Discord"</a>
                    " or reach out on "
                    <a href="https://hive.blog/@vimm" target="_blank" rel="noopener noreferrer" class="underline">"Hive"</a>
                    " for additional support."
                </p>
            </footer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_populated_categories() {
        assert_eq!(FAQ.len(), 6);
        assert!(FAQ.iter().all(|s| !s.items.is_empty()));
    }

    #[test]
    fn toggling_twice_closes_an_item() {
        let mut open = HashSet::new();
        toggle(&mut open, (1, 2));
        assert!(open.contains(&(1, 2)));
        toggle(&mut open, (0, 0));
        toggle(&mut open, (1, 2));
        assert!(!open.contains(&(1, 2)));
        assert!(open.contains(&(0, 0)));
    }
}
