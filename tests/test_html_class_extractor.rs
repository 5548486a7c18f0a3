#[cfg(test)]
mod tests {
    use tinychefs_shopping::config::MarkupSchema;
    use tinychefs_shopping::extractors::{Extractor, HtmlClassExtractor, SourceDocument};
    use tinychefs_shopping::{aggregator::aggregate, RawIngredientLine, ShoppingList};

    fn ingredient_row(name: &str, quantity: &str, unit: &str) -> String {
        format!(
            r#"<div class="x241">
                <div class="x242">{name}</div>
                <div class="x242">{quantity}</div>
                <div class="x242">{unit}</div>
            </div>"#
        )
    }

    fn recipe_export(body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
            <html>
            <head><title>Weekly plan</title></head>
            <body>
                <div class="x240">
                    {body}
                </div>
            </body>
            </html>"#
        )
    }

    #[test]
    fn test_produce_section_with_raw_quantity() {
        let html = recipe_export(&format!(
            r#"<div class="x245">Produce</div>{}{}{}"#,
            ingredient_row("Spinach", "2", "Cups"),
            ingredient_row("Carrots", "1", "pounds"),
            ingredient_row("Sea Salt", "to taste", "pinch"),
        ));

        let extractor = HtmlClassExtractor::new(MarkupSchema::default()).unwrap();
        let records = extractor.extract(&SourceDocument::html("plan.html", html));

        assert_eq!(
            records,
            vec![
                RawIngredientLine::new("Spinach", "2", "cup", "PRODUCE"),
                RawIngredientLine::new("Carrots", "1", "lb", "PRODUCE"),
                RawIngredientLine::new("Sea Salt", "to taste", "pinch", "PRODUCE"),
            ]
        );

        let rows = aggregate(&records, 1.0);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].ingredient, "sea salt");
        assert_eq!(rows[2].category, "PRODUCE");
        assert_eq!(rows[2].quantity_display, "to taste pinch");
    }

    #[test]
    fn test_recipes_section_is_not_read() {
        let html = recipe_export(&format!(
            r#"<div class="x245">Dairy</div>{}
               <div class="x250"><div class="x251">RECIPES</div></div>
               {}"#,
            ingredient_row("Milk", "1", "cup"),
            ingredient_row("Milk", "3", "cup"),
        ));

        let table = ShoppingList::builder()
            .html("plan.html", html)
            .servings(10)
            .build()
            .unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].quantity_display, "1 cup");
    }

    #[test]
    fn test_zero_quantity_with_unit_counts_once_per_row() {
        let html = recipe_export(&format!(
            r#"<div class="x245">Produce</div>{}{}"#,
            ingredient_row("Garlic", "0", "cloves"),
            ingredient_row("garlic", "2", "Cloves"),
        ));

        let table = ShoppingList::builder()
            .html("plan.html", html)
            .servings(20)
            .build()
            .unwrap();

        assert_eq!(table.rows[0].quantity_display, "6 clove");
    }

    #[test]
    fn test_pdf_documents_are_not_accepted() {
        let extractor = HtmlClassExtractor::new(MarkupSchema::default()).unwrap();
        let document = SourceDocument::pdf_pages("list.pdf", vec!["1 cup rice".to_string()]);

        assert!(!extractor.can_parse(&document));
        assert!(extractor.extract(&document).is_empty());
    }
}
