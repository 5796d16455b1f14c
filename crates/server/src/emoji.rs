//! Emoji autocomplete candidates.
//!
//! The react modal's `external_select` asks this backend for options as the
//! user types. Candidates are the static keyword set below unioned with the
//! workspace's custom emoji (fetched live), prefix-filtered and capped.

/// Maximum number of options returned to Slack.
pub const MAX_OPTIONS: usize = 100;

/// Static emoji keyword set, as `:name:` tokens.
///
/// A hand-kept subset of the standard emoji short codes; workspace custom
/// emoji are appended at query time.
pub const EMOJI_KEYWORDS: &[&str] = &[
    ":+1:",
    ":-1:",
    ":100:",
    ":1234:",
    ":8ball:",
    ":alien:",
    ":angel:",
    ":anger:",
    ":angry:",
    ":anguished:",
    ":ant:",
    ":apple:",
    ":armenia:",
    ":art:",
    ":astonished:",
    ":avocado:",
    ":baby:",
    ":balloon:",
    ":banana:",
    ":bear:",
    ":beer:",
    ":beers:",
    ":bee:",
    ":bell:",
    ":bento:",
    ":bike:",
    ":birthday:",
    ":blossom:",
    ":blue_heart:",
    ":blush:",
    ":boar:",
    ":bomb:",
    ":book:",
    ":boom:",
    ":bow:",
    ":brain:",
    ":bread:",
    ":broken_heart:",
    ":bug:",
    ":bulb:",
    ":burrito:",
    ":cactus:",
    ":cake:",
    ":calendar:",
    ":camera:",
    ":candy:",
    ":cat:",
    ":champagne:",
    ":chart_with_upwards_trend:",
    ":cherries:",
    ":chicken:",
    ":clap:",
    ":clown_face:",
    ":coffee:",
    ":cold_sweat:",
    ":confetti_ball:",
    ":confused:",
    ":cookie:",
    ":cool:",
    ":cow:",
    ":crown:",
    ":cry:",
    ":crying_cat_face:",
    ":cupid:",
    ":dancer:",
    ":dart:",
    ":disappointed:",
    ":dizzy:",
    ":dog:",
    ":dolphin:",
    ":doughnut:",
    ":dragon:",
    ":drooling_face:",
    ":duck:",
    ":eagle:",
    ":ear:",
    ":egg:",
    ":eggplant:",
    ":elephant:",
    ":exploding_head:",
    ":eyes:",
    ":facepalm:",
    ":fearful:",
    ":fire:",
    ":fireworks:",
    ":fish:",
    ":fist:",
    ":flushed:",
    ":four_leaf_clover:",
    ":fox_face:",
    ":fries:",
    ":frog:",
    ":frowning:",
    ":gem:",
    ":ghost:",
    ":gift:",
    ":grapes:",
    ":green_heart:",
    ":grimacing:",
    ":grin:",
    ":grinning:",
    ":guitar:",
    ":hamburger:",
    ":hammer:",
    ":hand:",
    ":handshake:",
    ":hatched_chick:",
    ":headphones:",
    ":heart:",
    ":heart_eyes:",
    ":heavy_check_mark:",
    ":herb:",
    ":hibiscus:",
    ":honeybee:",
    ":horse:",
    ":hot_pepper:",
    ":hourglass:",
    ":hugging_face:",
    ":hushed:",
    ":ice_cream:",
    ":imp:",
    ":innocent:",
    ":jack_o_lantern:",
    ":joy:",
    ":joy_cat:",
    ":key:",
    ":kiss:",
    ":kissing_heart:",
    ":koala:",
    ":laughing:",
    ":leaves:",
    ":lemon:",
    ":light_rail:",
    ":lightning:",
    ":lips:",
    ":lock:",
    ":lollipop:",
    ":loudspeaker:",
    ":love_letter:",
    ":mag:",
    ":mailbox:",
    ":maple_leaf:",
    ":mask:",
    ":melting_face:",
    ":memo:",
    ":metal:",
    ":microphone:",
    ":milky_way:",
    ":moneybag:",
    ":monkey:",
    ":moon:",
    ":mouse:",
    ":muscle:",
    ":mushroom:",
    ":musical_note:",
    ":nerd_face:",
    ":neutral_face:",
    ":no_mouth:",
    ":nose:",
    ":notebook:",
    ":ocean:",
    ":octopus:",
    ":ok_hand:",
    ":open_mouth:",
    ":orange_heart:",
    ":owl:",
    ":palm_tree:",
    ":panda_face:",
    ":paperclip:",
    ":partying_face:",
    ":peach:",
    ":penguin:",
    ":pensive:",
    ":pig:",
    ":pineapple:",
    ":pizza:",
    ":pleading_face:",
    ":point_up:",
    ":popcorn:",
    ":pray:",
    ":purple_heart:",
    ":rabbit:",
    ":rainbow:",
    ":raised_hands:",
    ":ramen:",
    ":relieved:",
    ":ribbon:",
    ":robot_face:",
    ":rocket:",
    ":rose:",
    ":salt:",
    ":santa:",
    ":satellite:",
    ":scream:",
    ":scream_cat:",
    ":seedling:",
    ":shrug:",
    ":skull:",
    ":sleeping:",
    ":sleepy:",
    ":slightly_smiling_face:",
    ":smile:",
    ":smile_cat:",
    ":smiley:",
    ":smiling_imp:",
    ":smirk:",
    ":snail:",
    ":snake:",
    ":snowflake:",
    ":snowman:",
    ":sob:",
    ":sparkles:",
    ":speak_no_evil:",
    ":star:",
    ":star-struck:",
    ":stars:",
    ":strawberry:",
    ":stuck_out_tongue:",
    ":sunflower:",
    ":sunglasses:",
    ":sunny:",
    ":sushi:",
    ":sweat:",
    ":sweat_smile:",
    ":taco:",
    ":tada:",
    ":tea:",
    ":thinking_face:",
    ":thumbsdown:",
    ":thumbsup:",
    ":tiger:",
    ":tired_face:",
    ":tomato:",
    ":tongue:",
    ":trophy:",
    ":tulip:",
    ":turtle:",
    ":umbrella:",
    ":unamused:",
    ":unicorn_face:",
    ":upside_down_face:",
    ":v:",
    ":wave:",
    ":weary:",
    ":whale:",
    ":white_check_mark:",
    ":wilted_flower:",
    ":wink:",
    ":wolf:",
    ":worried:",
    ":x:",
    ":yawning_face:",
    ":yellow_heart:",
    ":yum:",
    ":zany_face:",
    ":zap:",
    ":zipper_mouth_face:",
    ":zzz:",
];

/// Build the option tokens for an autocomplete query.
///
/// The static set comes first, then the workspace's custom emoji, each
/// rendered as a `:name:` token. Prefix matching ignores the surrounding
/// colons, so a user typing `sm` (or `:sm`) matches `:smile:`. The result
/// is capped at [`MAX_OPTIONS`] entries.
#[must_use]
pub fn candidates(query: &str, custom: &[String]) -> Vec<String> {
    let query = query.trim_start_matches(':');

    EMOJI_KEYWORDS
        .iter()
        .map(|token| (*token).to_string())
        .chain(custom.iter().map(|name| format!(":{name}:")))
        .filter(|token| token.trim_matches(':').starts_with(query))
        .take(MAX_OPTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_prefix_filter() {
        let results = candidates("sm", &[]);

        assert!(results.contains(&":smile:".to_string()));
        assert!(results.contains(&":smirk:".to_string()));
        assert!(
            results
                .iter()
                .all(|token| token.trim_matches(':').starts_with("sm"))
        );
    }

    #[test]
    fn test_candidates_colon_prefix_equivalent() {
        assert_eq!(candidates(":sm", &[]), candidates("sm", &[]));
    }

    #[test]
    fn test_candidates_include_custom_emoji() {
        let custom = vec!["smugparrot".to_string()];
        let results = candidates("smug", &custom);

        assert_eq!(results, vec![":smugparrot:".to_string()]);
    }

    #[test]
    fn test_candidates_static_before_custom() {
        let custom = vec!["smile2".to_string()];
        let results = candidates("smile", &custom);

        let smile = results
            .iter()
            .position(|t| t == ":smile:")
            .expect(":smile: present");
        let smile2 = results
            .iter()
            .position(|t| t == ":smile2:")
            .expect(":smile2: present");
        assert!(smile < smile2);
    }

    #[test]
    fn test_candidates_capped() {
        // Enough custom emoji to overflow the cap
        let custom: Vec<String> = (0..200).map(|i| format!("custom_{i}")).collect();
        let results = candidates("", &custom);

        assert_eq!(results.len(), MAX_OPTIONS);
    }

    #[test]
    fn test_candidates_empty_for_unknown_prefix() {
        assert!(candidates("zzzzzzz_nothing", &[]).is_empty());
    }

    #[test]
    fn test_static_set_is_colon_delimited() {
        for token in EMOJI_KEYWORDS {
            assert!(token.starts_with(':') && token.ends_with(':'), "{token}");
        }
    }
}
