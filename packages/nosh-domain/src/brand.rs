use crate::text::simplify;

/// A query split into its recognized brand prefix and the remaining item
/// text. Both halves are already simplified. An unrecognized brand leaves
/// `brand` empty and `item` equal to the whole simplified query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrandSplit {
	pub brand: String,
	pub item: String,
}

/// Split a raw query into `{brand, item}` by longest word-boundary prefix
/// match against the built-in brand lexicon.
pub fn detect_brand_and_item(query: &str) -> BrandSplit {
	let simplified = simplify(query);

	if simplified.is_empty() {
		return BrandSplit::default();
	}

	let mut best: Option<&str> = None;

	for &brand in BRAND_LEXICON {
		if starts_with_word(&simplified, brand)
			&& best.map(|current| brand.len() > current.len()).unwrap_or(true)
		{
			best = Some(brand);
		}
	}

	match best {
		Some(brand) => BrandSplit {
			brand: brand.to_string(),
			item: simplified[brand.len()..].trim_start().to_string(),
		},
		None => BrandSplit { brand: String::new(), item: simplified },
	}
}

fn starts_with_word(text: &str, prefix: &str) -> bool {
	match text.strip_prefix(prefix) {
		Some(rest) => rest.is_empty() || rest.starts_with(' '),
		None => false,
	}
}

/// Simplified-form brand names recognized as query prefixes. Multi-word
/// entries must stay in simplified form (lowercase, no punctuation) or they
/// will never match.
const BRAND_LEXICON: &[&str] = &[
	"amys",
	"annies",
	"barilla",
	"ben jerrys",
	"bench press",
	"burger king",
	"campbells",
	"cheerios",
	"chick fil a",
	"chipotle",
	"chobani",
	"clif",
	"coca cola",
	"dannon",
	"digiorno",
	"dominos",
	"dunkin",
	"eggo",
	"fage",
	"five guys",
	"gatorade",
	"general mills",
	"great value",
	"haagen dazs",
	"healthy choice",
	"heinz",
	"hillshire farm",
	"hot pockets",
	"jersey mikes",
	"jif",
	"jimmy dean",
	"kelloggs",
	"kfc",
	"kind",
	"kirkland",
	"kraft",
	"lean cuisine",
	"luna",
	"mcdonalds",
	"nature valley",
	"nestle",
	"oikos",
	"oscar mayer",
	"panda express",
	"panera",
	"pepperidge farm",
	"pepsi",
	"perdue",
	"philadelphia",
	"pizza hut",
	"prego",
	"progresso",
	"quaker",
	"quest",
	"ragu",
	"rxbar",
	"sargento",
	"skippy",
	"smuckers",
	"special k",
	"starbucks",
	"stouffers",
	"subway",
	"taco bell",
	"thomas",
	"tillamook",
	"totinos",
	"trader joes",
	"tyson",
	"wendys",
	"whole foods",
	"yoplait",
];
