// ============================================================
// Scrape prompts: the browser agent's task script and the cleanup pass that
// turns the agent's free text into a JSON array.
// ============================================================

/// Natural-language task handed to the browser agent. Creates a saved search on
/// Wellfound and reads the first 20 candidate listings.
pub const TASK_SCRIPT: &str = r#"1. Go to https://wellfound.com/recruit/search/new and wait until the search form is fully loaded.
2. In the search page, fill in the following fields exactly:
   a. Search name: type "Cyber Security, Network Security, Ethical Hacking, Risk Management, Security Protocols" into the input labeled 'Search name'.
   b. Broadly speaking, what function are you hiring for?: select the radio button with label 'Engineering'. Use the selector input[type=radio][name="function"][value="Engineering"] and wait for the 'Role' options to appear.
   c. Role: select the radio button with label 'Software Engineer'. Use the selector input[type=radio][name="role"][value="Software Engineer"]. Wait for 'Location' options to appear.
   d. Location: select the radio button with label 'Onsite or Remote'. Use input[type=radio][name="locationPreference"][value="Onsite or Remote"].
3. Click the button whose text is 'Create Search' (ensure it's the search form button, not the global search icon), then wait for the results list to load. If the right page appears then do not mind filling all fields.
4. On the search results page, for each of the first 20 candidate listings:
   a. Click on the candidate's name (use the link inside each listing with selector a[data-test="candidate-name"]) to expand the details inline.
   b. From the expanded view, capture the full text (including all paragraphs, bullet points, and formatting) of these fields:
       - name
       - total_experience
       - location
       - achievements
       - experience_section (entire experience details)
       - education
       - skills
       - desired_salary
       - desired_role
       - remote_work
       - desired_location
   c. After extraction, scroll as needed to ensure all items load, then move to the next candidate.
   d. Repeat for the first 20 listings on page 1.
5. Combine all extracted candidate objects into a single JSON array and output it wrapped in ```json ...```.
"#;

/// Reformatting instruction for the cleanup model. Placeholder: {raw_text}.
pub const CLEANUP_PROMPT_TEMPLATE: &str = r#"The following text contains candidate profiles extracted from multiple pages.
Your task is to extract all candidate profiles and format them into a single JSON array. Do not summarise the data keep it same.
Each candidate profile should have the following keys: - name, total_experience, location, achievements,
experience_section (an object of all the experience details), education, skills, desired_salary, desired_role,
remote_work, desired_location
Here is the text:
{raw_text}
Please provide the combined JSON array of all candidates profiles wrapped in ```json ```.
"#;
