//! Deterministic pod-name emoji.
//!
//! Each pod name hashes to one entry of a fixed emoji catalog, giving every
//! replica a human-scannable marker in chained responses. The mapping is a
//! pure function of the name: the same pod name always yields the same emoji
//! within a process run.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Fixed emoji catalog indexed by the pod-name hash.
const EMOJI_TABLE: &[&str] = &[
    "😀", "😃", "😄", "😁", "😆", "😅", "🤣", "😂", "🙂", "🙃", "😉", "😊",
    "😇", "🥰", "😍", "🤩", "😘", "😗", "😚", "😙", "🥲", "😋", "😛", "😜",
    "🤪", "😝", "🤑", "🤗", "🤭", "🤫", "🤔", "🤐", "🤨", "😐", "😑", "😶",
    "😏", "😒", "🙄", "😬", "🤥", "😌", "😔", "😪", "🤤", "😴", "😷", "🤒",
    "🤕", "🤢", "🤮", "🤧", "🥵", "🥶", "🥴", "😵", "🤯", "🤠", "🥳", "🥸",
    "😎", "🤓", "🧐", "😕", "😟", "🙁", "😮", "😯", "😲", "😳", "🥺", "😦",
    "😧", "😨", "😰", "😥", "😢", "😭", "😱", "😖", "😣", "😞", "😓", "😩",
    "😫", "🥱", "😤", "😡", "😠", "🤬", "😈", "👿", "💀", "👻", "👽", "👾",
    "🤖", "🎃", "😺", "😸", "😹", "😻", "😼", "😽", "🙀", "😿", "😾", "🙈",
    "🙉", "🙊", "🐵", "🐒", "🦍", "🦧", "🐶", "🐕", "🦮", "🐩", "🐺", "🦊",
    "🦝", "🐱", "🐈", "🦁", "🐯", "🐅", "🐆", "🐴", "🐎", "🦄", "🦓", "🦌",
    "🦬", "🐮", "🐂", "🐃", "🐄", "🐷", "🐖", "🐗", "🐽", "🐏", "🐑", "🐐",
    "🐪", "🐫", "🦙", "🦒", "🐘", "🦣", "🦏", "🦛", "🐭", "🐁", "🐀", "🐹",
    "🐰", "🐇", "🐿", "🦫", "🦔", "🦇", "🐻", "🐨", "🐼", "🦥", "🦦", "🦨",
    "🦘", "🦡", "🐾", "🦃", "🐔", "🐓", "🐣", "🐤", "🐥", "🐦", "🐧", "🕊",
    "🦅", "🦆", "🦢", "🦉", "🦤", "🪶", "🦩", "🦚", "🦜", "🐸", "🐊", "🐢",
    "🦎", "🐍", "🐲", "🐉", "🦕", "🦖", "🐳", "🐋", "🐬", "🦭", "🐟", "🐠",
    "🐡", "🦈", "🐙", "🐚", "🐌", "🦋", "🐛", "🐜", "🐝", "🪲", "🐞", "🦗",
    "🪳", "🕷", "🕸", "🦂", "🦟", "🪰", "🪱", "🦠", "💐", "🌸", "💮", "🏵",
    "🌹", "🥀", "🌺", "🌻", "🌼", "🌷", "🌱", "🪴", "🌲", "🌳", "🌴", "🌵",
    "🌾", "🌿", "☘", "🍀", "🍁", "🍂", "🍃", "🍇", "🍈", "🍉", "🍊", "🍋",
    "🍌", "🍍", "🥭", "🍎", "🍏", "🍐", "🍑", "🍒", "🍓", "🫐", "🥝", "🍅",
    "🫒", "🥥", "🥑", "🍆", "🥔", "🥕", "🌽", "🌶", "🫑", "🥒", "🥬", "🥦",
    "🧄", "🧅", "🍄", "🥜", "🌰", "🍞", "🥐", "🥖", "🫓", "🥨", "🥯", "🥞",
    "🧇", "🧀", "🍖", "🍗", "🥩", "🥓", "🍔", "🍟", "🍕", "🌭", "🥪", "🌮",
    "🌯", "🫔", "🥙", "🧆", "🥚", "🍳", "🥘", "🍲", "🫕", "🥣", "🥗", "🍿",
    "🧈", "🧂", "🥫", "🍱", "🍘", "🍙", "🍚", "🍛", "🍜", "🍝", "🍠", "🍢",
    "🍣", "🍤", "🍥", "🥮", "🍡", "🥟", "🥠", "🥡", "🦀", "🦞", "🦐", "🦑",
    "🦪", "🍦", "🍧", "🍨", "🍩", "🍪", "🎂", "🍰", "🧁", "🥧", "🍫", "🍬",
    "🍭", "🍮", "🍯", "🌍", "🌎", "🌏", "🌐", "🗺", "🧭", "🏔", "⛰", "🌋",
    "🗻", "🏕", "🏖", "🏜", "🏝", "🏞", "🏟", "🏛", "🏗", "🏘", "🏚", "🏠",
    "🏡", "🏢", "🏣", "🏤", "🏥", "🏦", "🏨", "🏩", "🏪", "🏫", "🏬", "🏭",
    "🏯", "🏰", "💒", "🗼", "🗽", "⛲", "⛺", "🌁", "🌃", "🏙", "🌄", "🌅",
    "🌆", "🌇", "🌉", "🎠", "🎡", "🎢", "💈", "🎪", "🚂", "🚃", "🚄", "🚅",
    "🚆", "🚇", "🚈", "🚉", "🚊", "🚝", "🚞", "🚋", "🚌", "🚍", "🚎", "🚐",
    "🚑", "🚒", "🚓", "🚔", "🚕", "🚖", "🚗", "🚘", "🚙", "🛻", "🚚", "🚛",
    "🚜", "🏎", "🏍", "🛵", "🦽", "🦼", "🛺", "🚲", "🛴", "🛹", "🛼", "🚁",
    "🚟", "🚠", "🚡", "🛰", "🚀", "🛸", "⛵", "🛶", "🚤", "🛳", "⛴", "🛥",
    "🚢", "⚓", "⛽", "🚧", "🚦", "🚥", "🎆", "🎇", "🎑", "💫", "⭐", "🌟",
    "✨", "⚡", "☄", "💥", "🔥", "🌪", "🌈", "☀", "🌤", "⛅", "🌥", "☁",
    "🌦", "🌧", "⛈", "🌩", "🌨", "❄", "☃", "⛄", "🌬", "💨", "💧", "💦",
    "☔", "🌊", "🎗", "🎟", "🎫", "🎖", "🏆", "🏅", "🥇", "🥈", "🥉", "⚽",
    "⚾", "🥎", "🏀", "🏐", "🏈", "🏉", "🎾", "🥏", "🎳", "🏏", "🏑", "🏒",
    "🥍", "🏓", "🏸", "🥊", "🥋", "🥅", "⛳", "⛸", "🎣", "🤿", "🎽", "🎿",
    "🛷", "🥌", "🎯", "🪀", "🪁", "🎱", "🔮", "🪄", "🎮", "🕹", "🎰", "🎲",
    "🧩", "🪅", "🪆", "♟", "🎭", "🖼", "🎨", "🧵", "🪡", "🧶", "🪢", "🎼",
    "🎵", "🎶", "🎙", "🎚", "🎛", "🎤", "🎧", "📻", "🎷", "🪗", "🎸", "🎹",
    "🎺", "🎻", "🪕", "🥁", "🪘", "🎬", "🏹", "💎", "🔔", "🎈", "🎉", "🎊",
    "🎀", "🎁", "🧨", "🔑", "🗝", "🔨", "🪓", "⛏", "⚒", "🛠", "🗡", "⚔",
    "🔧", "🪛", "🔩", "⚙", "🗜", "⚖", "🦯", "🔗", "⛓", "🪝", "🧰", "🧲",
    "🪜", "⚗", "🧪", "🧫", "🧬", "🔬", "🔭", "📡", "🧱", "🪨", "🪵", "🛎",
    "🧳", "⌛", "⏳", "⌚", "⏰", "⏱", "⏲", "🕰", "🌡", "⛱", "🧯", "🛢",
    "💡", "🔦", "🏮", "🪔", "📔", "📕", "📖", "📗", "📘", "📙", "📚", "📓",
    "📒", "📃", "📜", "📄", "📰", "🗞", "📑", "🔖", "🏷", "💰", "🪙", "💴",
    "💵", "💶", "💷", "💸", "💳", "🧾", "✉", "📧", "📨", "📩", "📤", "📥",
    "📦", "📫", "📪", "📬", "📭", "📮", "🗳", "✏", "✒", "🖋", "🖊", "🖌",
    "🖍", "📝", "💼", "📁", "📂", "🗂", "📅", "📆", "🗒", "🗓", "📇", "📈",
    "📉", "📊", "📋", "📌", "📍", "📎", "🖇", "📏", "📐", "✂", "🗃", "🗄",
    "🗑", "🔒", "🔓", "🔏", "🔐", "🧿", "🩺", "🚪", "🛗", "🪞", "🪟", "🛏",
    "🛋", "🪑", "🚽", "🪠", "🚿", "🛁", "🧼", "🪒", "🧴", "🧷", "🧹", "🧺",
    "🧻", "🪣", "🧽", "🛒", "🚬", "🗿", "🪧", "🎌", "🚩", "🏁", "🏳", "🏴",
];

fn stable_hash(name: &str) -> u64 {
    // DefaultHasher::new() seeds with fixed keys, so the mapping holds for
    // the process lifetime (and across runs).
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

/// The catalog entry for a pod name.
pub fn emoji_for(pod_name: &str) -> &'static str {
    let index = stable_hash(pod_name) % EMOJI_TABLE.len() as u64;
    EMOJI_TABLE[index as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_emoji() {
        assert_eq!(emoji_for("frontend-7d4f9b"), emoji_for("frontend-7d4f9b"));
        assert_eq!(emoji_for(""), emoji_for(""));
    }

    #[test]
    fn emoji_comes_from_the_table() {
        for name in ["a", "pod-1", "whereami-5c8d76f94b-x2x7k", "☃"] {
            assert!(EMOJI_TABLE.contains(&emoji_for(name)));
        }
    }

    #[test]
    fn table_has_no_empty_entries() {
        assert!(!EMOJI_TABLE.is_empty());
        assert!(EMOJI_TABLE.iter().all(|e| !e.is_empty()));
    }
}
