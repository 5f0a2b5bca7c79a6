use std::sync::LazyLock;

use pantryplan_shared::normalize_name;
use pantryplan_shared::recipe::Category;
use regex::Regex;

/// Built-in rules, most specific first: compound names such as
/// "caldo de pollo" or "peanut butter" must be decided before the
/// single-word rules would claim them.
const BUILTIN_RULES: &[(&str, Category)] = &[
    (
        r"\b(frozen|congelad[oa]s?|ice cream|helados?)\b",
        Category::Frozen,
    ),
    (
        r"\b(broth|stock|caldo|sauce|salsa|paste|pur[eé]|powder|en polvo|pan rallado|breadcrumbs?|peanut butter|mantequilla de man[ií]|canned|enlatad[oa]s?|en lata)\b",
        Category::Grocery,
    ),
    (
        r"\b(fish|pescado|salmon|salm[oó]n|tuna|at[uú]n|cod|bacalao|merluza|tilapia|shrimps?|prawns?|camar[oó]n|camarones|langostinos?|mussels|mejillones|squid|calamar(es)?|crab|cangrejo|lobster|scallops?|anchov(y|ies)|anchoas?|sardines?|sardinas?)\b",
        Category::Seafood,
    ),
    (
        r"\b(chicken|pollo|beef|carne|ground meat|picada|steak|bife|pork|cerdo|bacon|panceta|ham|jam[oó]n|sausages?|chorizos?|salchichas?|turkey|pavo|lamb|cordero|veal|ternera|milanesas?|duck|pato|brisket|asado|lomo|pechugas?)\b",
        Category::Butcher,
    ),
    (
        r"\b(milk|leche|butter|mantequilla|manteca|cream|crema|cheese|queso|yogh?urt|yogur|eggs?|huevos?|ricotta|mozzarella|muzzarella|parmesan|parmesano)\b",
        Category::DairyAndEggs,
    ),
    (
        r"\b(bread|pan|baguette|tortillas?|pita|bagels?|croissants?|buns?|medialunas?|facturas)\b",
        Category::Bakery,
    ),
    (
        r"\b(cookies?|galletitas?|galletas?|chocolate|chips|papas fritas|candy|caramelos?|alfajor(es)?|barritas?)\b",
        Category::SnacksAndConfectionery,
    ),
    (
        r"\b(water|agua|juice|jugo|zumo|soda|gaseosa|wine|vino|beer|cerveza|coffee|caf[eé]|tea)\b",
        Category::Beverages,
    ),
    (
        r"\b(tomato(es)?|tomates?|onions?|cebollas?|garlic|ajos?|lettuce|lechuga|carrots?|zanahorias?|celery|apio|bell peppers?|morr[oó]n|morrones|pimientos?|cucumbers?|pepinos?|zucchini|zapallitos?|calabac[ií]n|broccoli|br[oó]coli|cauliflower|coliflor|spinach|espinacas?|kale|cabbage|repollo|potato(es)?|papas?|patatas?|batatas?|mushrooms?|champi[ñn]ones|hongos|corn|ma[ií]z|choclos?|avocados?|paltas?|aguacates?|eggplants?|berenjenas?|squash|zapallo|calabaza|ginger|jengibre|cilantro|parsley|perejil|basil|albahaca|mint|menta|thyme|tomillo|rosemary|romero|apples?|manzanas?|bananas?|pl[aá]tanos?|oranges?|naranjas?|lemons?|lim[oó]n|limones|limes?|strawberr(y|ies)|frutillas?|fresas?|blueberr(y|ies)|ar[aá]ndanos|grapes?|uvas?|mangos?|mangoes|pineapples?|an[aá]n[aá]|pi[ñn]as?|watermelons?|sand[ií]as?|peach(es)?|duraznos?|pears?|peras?|frutas?|verduras?|vegetables)\b",
        Category::FruitsAndVegetables,
    ),
    (
        r"\b(flour|harina|rice|arroz|pasta|fideos|spaghetti|noodles|oats|avena|quinoa|couscous|sugar|az[uú]car|salt|sal|pepper|pimienta|oil|aceite|vinegar|vinagre|beans|porotos|frijoles|lentils|lentejas|chickpeas|garbanzos|honey|miel|yeast|levadura|spices?|especias|oregano|or[eé]gano|cumin|comino|paprika|piment[oó]n|cinnamon|canela|cocoa|cacao|nuts|nueces|almonds|almendras|jam|mermelada|mustard|mostaza|mayonnaise|mayonesa|ketchup)\b",
        Category::Grocery,
    ),
];

static DEFAULT_RULES: LazyLock<CategoryRules> = LazyLock::new(|| {
    let mut rules = CategoryRules::new();
    for (pattern, category) in BUILTIN_RULES {
        rules.push(CategoryRule::new(pattern, *category).unwrap());
    }
    rules
});

#[derive(Debug, Clone)]
pub struct CategoryRule {
    pattern: Regex,
    category: Category,
}

impl CategoryRule {
    /// `pattern` is matched against the lowercased, trimmed ingredient name.
    pub fn new(pattern: &str, category: Category) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            category,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn matches(&self, normalized_name: &str) -> bool {
        self.pattern.is_match(normalized_name)
    }
}

/// Ordered pattern → category table. The first matching rule decides;
/// a name no rule matches is [`Category::Other`].
#[derive(Debug, Clone, Default)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl CategoryRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in English/Spanish table.
    pub fn builtin() -> &'static CategoryRules {
        &DEFAULT_RULES
    }

    pub fn push(&mut self, rule: CategoryRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn categorize(&self, ingredient_name: &str) -> Category {
        let normalized = normalize_name(ingredient_name);

        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(CategoryRule::category)
            .unwrap_or_default()
    }
}

/// Categorize with the built-in table.
pub fn categorize(ingredient_name: &str) -> Category {
    DEFAULT_RULES.categorize(ingredient_name)
}
